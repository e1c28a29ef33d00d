use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use migration::{Migrator, MigratorTrait};
use tower_http::cors::CorsLayer;
use tracing::info;

use service::{
    FsBlobStore, GroupService, SeaOrmGroupRepository, SeaOrmStudentRepository, StudentService,
};

use crate::auth::{AppState, AuthSettings};
use crate::routes;

/// Wire everything together and serve until the process is stopped.
pub async fn run() -> anyhow::Result<()> {
    let cfg = configs::AppConfig::load_and_validate()?;

    let store = FsBlobStore::new(&cfg.uploads.dir);
    store
        .ensure()
        .await
        .with_context(|| format!("preparing upload dir {}", cfg.uploads.dir))?;

    let db = models::db::connect_with(&cfg.database)
        .await
        .context("connecting to database")?;
    Migrator::up(&db, None).await.context("running migrations")?;

    let group_repo = Arc::new(SeaOrmGroupRepository { db: db.clone() });
    let student_repo = Arc::new(SeaOrmStudentRepository { db: db.clone() });

    let state = AppState {
        groups: GroupService::new(group_repo.clone()),
        students: StudentService::new(student_repo, group_repo, Arc::new(store)),
        auth: AuthSettings {
            jwt_secret: cfg.auth.jwt_secret.clone(),
        },
    };

    let app = routes::build_router(state, CorsLayer::very_permissive());

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .context("parsing listen address")?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
