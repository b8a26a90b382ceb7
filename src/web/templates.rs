use std::sync::Arc;

use handlebars::Handlebars;
use serde_json::Value;

use crate::error::{AppError, AppResult};

const PARTIALS: &[(&str, &str)] = &[
    ("header", include_str!("../../templates/header.hbs")),
    ("footer", include_str!("../../templates/footer.hbs")),
];

const PAGES: &[(&str, &str)] = &[
    ("index", include_str!("../../templates/index.hbs")),
    ("about", include_str!("../../templates/about.hbs")),
    ("contact", include_str!("../../templates/contact.hbs")),
    ("test", include_str!("../../templates/test.hbs")),
    ("auth/signup", include_str!("../../templates/auth/signup.hbs")),
    ("auth/signin", include_str!("../../templates/auth/signin.hbs")),
    ("auth/profile", include_str!("../../templates/auth/profile.hbs")),
    ("auth/forgot", include_str!("../../templates/auth/forgot.hbs")),
    ("auth/reset", include_str!("../../templates/auth/reset.hbs")),
];

/// 页面模板，编译期嵌入
#[derive(Clone)]
pub struct Templates {
    registry: Arc<Handlebars<'static>>,
}

impl Templates {
    pub fn new() -> AppResult<Self> {
        let mut registry = Handlebars::new();

        for (name, source) in PARTIALS {
            registry
                .register_partial(name, *source)
                .map_err(|e| AppError::Template(format!("{}: {}", name, e)))?;
        }
        for (name, source) in PAGES {
            registry
                .register_template_string(name, *source)
                .map_err(|e| AppError::Template(format!("{}: {}", name, e)))?;
        }

        Ok(Self {
            registry: Arc::new(registry),
        })
    }

    pub fn render(&self, name: &str, data: &Value) -> AppResult<String> {
        Ok(self.registry.render(name, data)?)
    }
}
