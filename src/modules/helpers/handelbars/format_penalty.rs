use rocket_dyn_templates::handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext,
};

use crate::modules::helpers::handelbars::params::{check_param_count, number_param};

/// # penalty formatting helper
///
/// ### usage
/// ```handlebars
/// {{formatPenalty 2}}
/// ```
///
/// ### output
/// ```text
/// +2
/// ```
#[derive(Clone, Copy)]
pub struct FormatPenaltyHelper;

impl HelperDef for FormatPenaltyHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        helper: &Helper,
        _: &Handlebars,
        _: &Context,
        _: &mut RenderContext,
        out: &mut dyn Output,
    ) -> HelperResult {
        check_param_count(helper, 1)?;
        let penalty = number_param(helper, 0)?;

        out.write(&format!("+{}", penalty))?;
        Ok(())
    }
}
