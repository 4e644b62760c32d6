use handlebars::{Handlebars, TemplateError};

pub const REPOS_PAGE_TEMPLATE: &str = "repos_page";

pub fn handlebars<'hb>() -> Result<Handlebars<'hb>, TemplateError> {
    let mut hb = Handlebars::new();
    hb.set_strict_mode(true);

    let repos_page = include_str!("./repos.hbs");

    hb.register_template_string(REPOS_PAGE_TEMPLATE, repos_page)?;

    Ok(hb)
}
