use crate::{
    error::{BookingError, JoinSnafu, LiquidAction, LiquidSnafu, ThreadReason},
    liquid_utils::partials::{init_partials, PARTIALS},
    state::cache::TemplateCache,
};
use axum::response::Html;
use liquid::{model::Value, Object, ParserBuilder};
use snafu::ResultExt;
use std::{fmt::Debug, path::Path};

#[derive(Debug, Clone)]
pub struct BookingCompiler {
    cache: TemplateCache,
    instance_name: String,
}

impl BookingCompiler {
    pub fn new(cache: TemplateCache, instance_name: impl Into<String>) -> Self {
        Self {
            cache,
            instance_name: instance_name.into(),
        }
    }

    #[instrument(skip(self, globals))]
    pub async fn compile_with_newtitle(
        &self,
        path: impl AsRef<Path> + Debug,
        mut globals: Object,
        title_additional_info: Option<String>,
    ) -> Result<Html<String>, BookingError> {
        debug!("Reading in file + partials");

        let liquid = self.cache.get(path).await?.to_string();
        let partial_compiler = PARTIALS.get_or_init(init_partials).await.to_compiler();

        debug!("Inserting globals");

        let title = match title_additional_info {
            None => self.instance_name.clone(),
            Some(x) => format!("{x} - {}", self.instance_name),
        };

        globals.insert(
            "siteinfo".into(),
            Value::Object(liquid::object!({
                "instance_name": self.instance_name.as_str(),
                "html_title": title,
            })),
        );

        let html: Result<String, BookingError> = tokio::task::spawn_blocking(move || {
            debug!("Compiling");
            let res = ParserBuilder::with_stdlib()
                .partials(partial_compiler)
                .build()
                .context(LiquidSnafu {
                    attempt: LiquidAction::BuildingCompiler,
                })?
                .parse(&liquid)
                .with_context(|_e| LiquidSnafu {
                    attempt: LiquidAction::Parsing { text: liquid.clone() },
                })?
                .render(&globals)
                .context(LiquidSnafu {
                    attempt: LiquidAction::Rendering,
                })?;
            Ok(res)
        })
        .await
        .context(JoinSnafu {
            title: ThreadReason::LiquidCompiler,
        })?;

        Ok(Html(html?))
    }
}
