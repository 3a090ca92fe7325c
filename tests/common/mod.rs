//! Shared fixtures for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::mpsc;

use krystal::config::RouteConfig;
use krystal::dispatch::ModuleActions;
use krystal::module::site::{builtin_factories, NOT_FOUND_ROUTE};
use krystal::module::{Module, ModuleFactories, Translations};
use krystal::routing::{RouteOptions, RouteTable};
use krystal::{AppConfig, Bootstrap, HttpServer, Shutdown};

/// Small blog module: a post page and a listing restricted to GET.
pub struct BlogModule;

impl Module for BlogModule {
    fn routes(&self) -> Option<RouteTable> {
        Some(
            RouteTable::new()
                .with_route("/post/(:var)", RouteOptions::controller("Post@view"))
                .with_route(
                    "/posts/(:var)/(:var)",
                    RouteOptions::controller("Post@archive").with_method("GET"),
                ),
        )
    }

    fn translations(&self, language: &str) -> Option<Translations> {
        (language == "en").then(|| Translations::from([("post".into(), "Post".into())]))
    }

    fn register_actions(&self, actions: &mut ModuleActions<'_>) {
        actions
            .add("Post@view", |ctx| {
                let id = ctx.variable(0)?;
                // Unknown posts render the not-found page.
                if id == "404" {
                    return None;
                }
                let label = ctx.translate("Blog", "post").unwrap_or("post");
                Some(format!("{} {}", label, id))
            })
            .add("Post@archive", |ctx| {
                Some(format!("archive {}", ctx.variables().join("-")))
            });
    }
}

pub fn factories() -> ModuleFactories {
    builtin_factories().with("Blog", |_| Arc::new(BlogModule))
}

/// Site + Blog, not-found page from the Site module.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.server.bind_address = "127.0.0.1:0".into();
    config.application.default_route = Some(NOT_FOUND_ROUTE.into());
    config.application.core_modules = vec!["Site".into()];
    config.modules.names = vec!["Site".into(), "Blog".into()];
    config.routes.push(RouteConfig {
        template: "/about".into(),
        options: RouteOptions::controller("Site:Main@home"),
    });
    config.redirects.insert("/old-home".into(), "/".into());
    config
}

pub fn bootstrap(config: AppConfig) -> Bootstrap {
    Bootstrap::new(config).with_factories(factories())
}

/// Serve `config` on an ephemeral port until the returned `Shutdown` fires.
#[allow(dead_code)]
pub async fn start_server(config: AppConfig) -> (SocketAddr, Shutdown) {
    let server = HttpServer::new(bootstrap(config)).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let (_, config_updates) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let _ = server.run(listener, config_updates, server_shutdown).await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(100)).await;
    (addr, shutdown)
}
