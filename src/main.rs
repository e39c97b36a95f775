//! Server binary: settings from env, pool, migrations, routes.

use classroom_service::config::StoreKind;
use classroom_service::{
    app, apply_migrations, connect_pool, ensure_database_exists, logging, AppState, ClassroomRepository,
    ClassroomService, MemoryClassroomRepository, PgClassroomRepository, Settings,
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;
    logging::init();

    let (repo, pool) = match settings.store {
        StoreKind::Memory => {
            tracing::warn!("using in-memory store; data is lost on exit");
            let repo: Arc<dyn ClassroomRepository> = Arc::new(MemoryClassroomRepository::new());
            (repo, None)
        }
        StoreKind::Postgres => {
            if settings.ensure_database {
                ensure_database_exists(&settings.database).await?;
            }
            let pool = connect_pool(&settings.database).await?;
            if settings.auto_migrate {
                let applied = apply_migrations(&pool).await?;
                tracing::info!(count = applied.len(), "migrations checked");
            }
            let repo: Arc<dyn ClassroomRepository> = Arc::new(PgClassroomRepository::new(pool.clone()));
            (repo, Some(pool))
        }
    };

    let state = AppState::new(ClassroomService::new(repo), settings.project_name.as_str());
    let router = app(state, &settings);

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!(
        project = %settings.project_name,
        prefix = %settings.api_prefix,
        "listening on {}",
        listener.local_addr()?
    );
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pool) = pool {
        pool.close().await;
    }
    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
