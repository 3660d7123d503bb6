use anyhow::Result;
use minijinja::Environment;

/// Editor pages, embedded at compile time.
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template("editor.html", include_str!("editor.html"))?;
        env.add_template("partials/settings.html", include_str!("partials/settings.html"))?;
        env.add_template("partials/preview.html", include_str!("partials/preview.html"))?;
        Ok(Self { env })
    }

    pub fn render(&self, template: &str, context: minijinja::value::Value) -> Result<String> {
        let tmpl = self.env.get_template(template)?;
        Ok(tmpl.render(context)?)
    }
}
