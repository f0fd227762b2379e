use rocket_dyn_templates::handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext,
};

use crate::modules::helpers::handelbars::params::{check_param_count, number_param};
use crate::modules::helpers::time::TimeHelper;

/// # run time formatting helper
/// formats a time in seconds as minutes, seconds and milliseconds
///
/// ### usage
/// ```handlebars
/// {{formatTime 65.5}}
/// ```
///
/// ### output
/// ```text
/// 01:05.500
/// ```
#[derive(Clone, Copy)]
pub struct FormatTimeHelper;

impl HelperDef for FormatTimeHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        helper: &Helper,
        _: &Handlebars,
        _: &Context,
        _: &mut RenderContext,
        out: &mut dyn Output,
    ) -> HelperResult {
        check_param_count(helper, 1)?;
        let seconds = number_param(helper, 0)?;

        out.write(&TimeHelper::format_time(seconds))?;
        Ok(())
    }
}
