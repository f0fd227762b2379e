use rocket_dyn_templates::handlebars::{Helper, RenderError};

/// # make sure a helper got exactly `expected` parameters
pub fn check_param_count(helper: &Helper, expected: usize) -> Result<(), RenderError> {
    let given = helper.params().len();
    if given == expected {
        return Ok(());
    }

    Err(RenderError::new(format!(
        "helper \"{}\" takes {} parameter(s), got {}",
        helper.name(),
        expected,
        given
    )))
}

/// # read a numeric parameter of a helper
pub fn number_param(helper: &Helper, index: usize) -> Result<f64, RenderError> {
    helper
        .param(index)
        .and_then(|param| param.value().as_f64())
        .ok_or_else(|| {
            RenderError::new(format!(
                "parameter {} of helper \"{}\" must be a number",
                index,
                helper.name()
            ))
        })
}
