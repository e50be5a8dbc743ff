//! Server harness for user delegation behaviour tests.
//!
//! Each scenario runs the real user routes over a socket, backed by the
//! in-memory store and the reqwest processing adapter. The downstream side is
//! a local stand-in whose behaviour the scenario picks before any request is
//! made. Actix uses `spawn_local`, so both servers live on a single-threaded
//! runtime driven through a `LocalSet`.

use std::cell::RefCell;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpResponse, HttpServer, web};
use rstest::fixture;
use serde_json::{Value, json};
use tokio::runtime::Runtime;
use tokio::task::LocalSet;
use url::Url;

use user_service::Trace;
use user_service::domain::{DelegationClient, UserDirectoryService};
use user_service::inbound::http::{self, health::HealthState, state::HttpState};
use user_service::outbound::memory::InMemoryUserStore;
use user_service::outbound::processing::HttpProcessingService;

/// Deadline applied to every downstream call made by the service under test.
pub(crate) const DOWNSTREAM_TIMEOUT: Duration = Duration::from_millis(300);
const STALL: Duration = Duration::from_secs(3);

/// How the stand-in processing service behaves for a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Downstream {
    Prompt,
    Stalled,
    Unreachable,
}

pub(crate) struct DelegationWorld {
    runtime: Runtime,
    local: LocalSet,
    base_url: Option<String>,
    servers: Vec<ServerHandle>,
    pub(crate) last_status: Option<u16>,
    pub(crate) last_body: Option<Value>,
}

pub(crate) type SharedWorld = Rc<RefCell<DelegationWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        shutdown(&self.world);
    }
}

fn shutdown(world: &SharedWorld) {
    let ctx = world.borrow();
    let servers = ctx.servers.clone();
    ctx.local.block_on(&ctx.runtime, async move {
        for server in servers {
            server.stop(true).await;
        }
    });
}

/// Run `operation` against the service's base URL on the world's runtime.
pub(crate) fn with_world_async<R, F>(world: &SharedWorld, operation: impl FnOnce(String) -> F) -> R
where
    F: std::future::Future<Output = R>,
{
    let ctx = world.borrow();
    let base_url = ctx
        .base_url
        .clone()
        .expect("service should be started by a Given step");
    ctx.local.block_on(&ctx.runtime, operation(base_url))
}

/// Start the stand-in downstream (unless unreachable) and the user service.
pub(crate) fn start_service(world: &SharedWorld, downstream: Downstream) {
    let started = {
        let ctx = world.borrow();
        ctx.local.block_on(&ctx.runtime, async move {
            let (downstream_url, downstream_handle) = match downstream {
                Downstream::Prompt => {
                    let (url, handle) = spawn_stand_in(false)?;
                    (url, Some(handle))
                }
                Downstream::Stalled => {
                    let (url, handle) = spawn_stand_in(true)?;
                    (url, Some(handle))
                }
                Downstream::Unreachable => (unreachable_url()?, None),
            };
            let (base_url, service_handle) = spawn_user_service(downstream_url)?;
            Ok::<_, String>((base_url, service_handle, downstream_handle))
        })
    };
    let (base_url, service_handle, downstream_handle) = started.expect("servers should start");

    let mut ctx = world.borrow_mut();
    ctx.base_url = Some(base_url);
    ctx.servers.push(service_handle);
    ctx.servers.extend(downstream_handle);
}

async fn processed_user(path: web::Path<u64>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "user_id": path.into_inner(),
        "processed_data": { "score": 5 }
    }))
}

async fn accepted() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "queued" }))
}

async fn stalled() -> HttpResponse {
    actix_web::rt::time::sleep(STALL).await;
    HttpResponse::Ok().finish()
}

fn spawn_stand_in(stall: bool) -> Result<(Url, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;

    let server = HttpServer::new(move || {
        if stall {
            App::new().default_service(web::to(stalled))
        } else {
            App::new()
                .route("/process-user", web::post().to(accepted))
                .route("/processed-users/{id}", web::get().to(processed_user))
                .route("/processed-users/{id}", web::delete().to(accepted))
        }
    })
    .disable_signals()
    .workers(1)
    .shutdown_timeout(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);
    let url = Url::parse(&format!("http://{addr}")).map_err(|err| err.to_string())?;
    Ok((url, handle))
}

fn unreachable_url() -> Result<Url, String> {
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;
    drop(listener);
    Url::parse(&format!("http://{addr}")).map_err(|err| err.to_string())
}

fn spawn_user_service(downstream_url: Url) -> Result<(String, ServerHandle), String> {
    let processing = HttpProcessingService::new(downstream_url, DOWNSTREAM_TIMEOUT)
        .map_err(|err| err.to_string())?;
    let delegation = DelegationClient::new(Arc::new(processing), DOWNSTREAM_TIMEOUT);
    let directory = UserDirectoryService::new(Arc::new(InMemoryUserStore::new()), delegation);
    let http_state = web::Data::new(HttpState::new(Arc::new(directory)));
    let health_state = web::Data::new(HealthState::new());

    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;

    let server = HttpServer::new(move || {
        App::new()
            .app_data(health_state.clone())
            .app_data(http_state.clone())
            .wrap(Trace)
            .configure(http::configure)
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);
    Ok((format!("http://{addr}"), handle))
}

fn create_runtime_and_local() -> (Runtime, LocalSet) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    (runtime, LocalSet::new())
}

#[fixture]
pub(crate) fn world() -> WorldFixture {
    let (runtime, local) = create_runtime_and_local();
    let world = Rc::new(RefCell::new(DelegationWorld {
        runtime,
        local,
        base_url: None,
        servers: Vec::new(),
        last_status: None,
        last_body: None,
    }));
    WorldFixture { world }
}
