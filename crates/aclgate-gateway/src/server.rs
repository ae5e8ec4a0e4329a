//! Gateway server: owns the ACL, interceptor, event bus, and subscriptions.
//!
//! Startup errors are explicit (`Result` instead of panic). One cancellation
//! token stops the dispatch task and every admin stream together.

use std::sync::{Arc, Mutex};

use serde_json::Value;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use aclgate_core::error::{GateError, Result};
use aclgate_core::protocol::method::service_of;
use aclgate_core::protocol::{Event, StatInterval, StatSnapshot};

use crate::admin::{AdminService, StreamSink, ADMIN_SERVICE};
use crate::bus::{self, SubscriberRegistry};
use crate::config::GatewaySection;
use crate::dispatch::Dispatcher;
use crate::intercept::{CallInfo, CallInterceptor};
use crate::policy::{AccessControlTable, Authorizer, MethodRule};
use crate::services::BizService;

pub struct Server {
    interceptor: Arc<CallInterceptor>,
    dispatcher: Arc<Dispatcher>,
    admin: AdminService,
    registry: Arc<SubscriberRegistry>,
    shutdown: CancellationToken,
    bus_task: Mutex<Option<JoinHandle<()>>>,
}

impl Server {
    /// Wire everything and spawn the dispatch task. Must run inside a tokio runtime.
    pub fn start(
        gw: &GatewaySection,
        acl: AccessControlTable,
        shutdown: CancellationToken,
    ) -> Result<Self> {
        gw.validate()?;

        let dispatcher = Dispatcher::new();
        dispatcher.register(Arc::new(BizService::new()));

        // acl <-> dispatcher sanity check
        {
            let known = dispatcher.registered_services();
            for consumer in acl.consumers() {
                for rule in acl.rules_for(consumer).unwrap_or_default() {
                    let svc = match rule {
                        MethodRule::Exact(m) => service_of(m),
                        MethodRule::Service(s) => s.as_str(),
                    };
                    if svc != ADMIN_SERVICE && !known.iter().any(|k| *k == svc) {
                        tracing::warn!(
                            %consumer,
                            service = svc,
                            "acl refers to unregistered service"
                        );
                    }
                }
            }
        }

        let registry = Arc::new(SubscriberRegistry::new(gw.subscriber_buffer));
        let (handle, event_bus) = bus::channel(Arc::clone(&registry));
        let bus_task = tokio::spawn(event_bus.run(shutdown.clone()));

        let authorizer = Arc::new(Authorizer::new(acl));
        let interceptor = Arc::new(CallInterceptor::new(authorizer, handle, gw.host.as_str()));
        let admin = AdminService::new(Arc::clone(&registry), shutdown.clone());

        tracing::info!(host = %gw.host, buffer = gw.subscriber_buffer, "gateway core started");

        Ok(Self {
            interceptor,
            dispatcher: Arc::new(dispatcher),
            admin,
            registry,
            shutdown,
            bus_task: Mutex::new(Some(bus_task)),
        })
    }

    /// Parse the ACL JSON, then [`Server::start`].
    pub fn start_with_json(
        gw: &GatewaySection,
        acl_json: &str,
        shutdown: CancellationToken,
    ) -> Result<Self> {
        let acl = AccessControlTable::from_json(acl_json)?;
        Self::start(gw, acl, shutdown)
    }

    pub fn interceptor(&self) -> Arc<CallInterceptor> {
        Arc::clone(&self.interceptor)
    }

    pub fn dispatcher(&self) -> Arc<Dispatcher> {
        Arc::clone(&self.dispatcher)
    }

    pub fn admin(&self) -> &AdminService {
        &self.admin
    }

    pub fn registry(&self) -> &Arc<SubscriberRegistry> {
        &self.registry
    }

    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    pub fn is_draining(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// Intercepted unary call routed through the dispatcher.
    pub async fn unary(&self, call: CallInfo, req: Value) -> Result<Value> {
        let dispatcher = Arc::clone(&self.dispatcher);
        self.interceptor
            .unary(call, req, move |ctx, req| async move {
                dispatcher.dispatch_unary(ctx, req).await
            })
            .await
    }

    /// Intercepted `Logging` stream.
    pub async fn logging<S: StreamSink<Event>>(&self, call: CallInfo, sink: S) -> Result<()> {
        let admin = self.admin.clone();
        self.interceptor
            .streaming(call, sink, move |_ctx, sink| async move {
                admin.subscribe_logs().run(sink).await
            })
            .await
    }

    /// Intercepted `Statistics` stream.
    pub async fn statistics<S: StreamSink<StatSnapshot>>(
        &self,
        call: CallInfo,
        interval: StatInterval,
        sink: S,
    ) -> Result<()> {
        let admin = self.admin.clone();
        self.interceptor
            .streaming(call, sink, move |_ctx, sink| async move {
                admin.subscribe_stats(interval)?.run(sink).await
            })
            .await
    }

    /// Fire the shared signal and wait for the dispatch task to return.
    /// Later calls only re-fire the signal.
    pub async fn shutdown(&self) -> Result<()> {
        self.shutdown.cancel();
        let task = self
            .bus_task
            .lock()
            .map_err(|_| GateError::Internal("bus task lock poisoned".into()))?
            .take();
        if let Some(task) = task {
            task.await
                .map_err(|e| GateError::Internal(format!("event bus task failed: {e}")))?;
            tracing::info!("gateway core stopped");
        }
        Ok(())
    }
}

/// Wait for Ctrl-C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("signal received, starting graceful shutdown");
}
