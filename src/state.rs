use crate::{
    cfg::Settings,
    credentials::CookieToken,
    form::{follow_up::Navigator, FormServices},
    service::BookingService,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

pub mod cache;
pub mod compiler;

use cache::TemplateCache;
use compiler::BookingCompiler;

///Navigation for forms living inside one HTTP request.
///
///The page answers with a `Refresh` header carrying the same target and delay, and the form is torn down with the request - so by the time this would run the browser is already on its way.
#[derive(Debug, Clone, Copy)]
pub struct BrowserRefresh;

impl Navigator for BrowserRefresh {
    fn navigate(&self, path: &str) {
        debug!(?path, "Navigation left to the browser");
    }
}

#[derive(Clone)]
pub struct BookingState {
    pub settings: Settings,
    pub service: Arc<dyn BookingService>,
    pub compiler: BookingCompiler,
}

impl BookingState {
    pub async fn new(settings: Settings, service: Arc<dyn BookingService>) -> Self {
        let cache = TemplateCache::new();
        cache.pre_populate().await;

        let compiler = BookingCompiler::new(cache, settings.brand.instance_name.clone());

        Self {
            settings,
            service,
            compiler,
        }
    }

    ///What a form mounted for this request talks to - the token comes from the request's cookies.
    pub fn form_services(&self, jar: &CookieJar) -> FormServices {
        FormServices {
            service: self.service.clone(),
            credentials: Arc::new(CookieToken::from(jar)),
            navigator: Arc::new(BrowserRefresh),
            settings: self.settings.form.clone(),
        }
    }
}
