//! 카탈로그 API 서버.
//!
//! Axum 기반 REST API 서버를 시작합니다.
//! 헬스 체크, 인증, 카테고리/상품/계정 관리 엔드포인트를 제공합니다.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{Extension, Router};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use store_api::openapi::swagger_ui_router;
use store_api::routes::create_api_router;
use store_api::state::AppState;
use store_core::{init_logging, AppConfig};

/// AppState 초기화.
///
/// DATABASE_URL이 설정되어 있으면 연결 풀을 생성합니다. DB 없이도
/// 서버는 뜨지만 저장소를 사용하는 엔드포인트는 503을 반환합니다.
async fn create_app_state(config: &AppConfig) -> AppState {
    let mut state = AppState::new(config.auth.clone());

    if let Ok(database_url) = std::env::var("DATABASE_URL") {
        match PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .acquire_timeout(Duration::from_secs(config.database.connection_timeout_secs))
            .connect(&database_url)
            .await
        {
            Ok(pool) => {
                if sqlx::query("SELECT 1").fetch_one(&pool).await.is_ok() {
                    info!("PostgreSQL 연결 성공");
                    state = state.with_db_pool(pool);
                } else {
                    error!("데이터베이스 연결 확인 실패");
                }
            }
            Err(e) => {
                error!("데이터베이스 연결 실패: {}", e);
            }
        }
    } else {
        warn!("DATABASE_URL이 설정되지 않아 저장소 기능이 비활성화됩니다");
    }

    state
}

/// CORS 미들웨어 구성.
///
/// CORS_ORIGINS 환경변수가 설정되어 있으면 해당 origin만 허용합니다.
/// 설정되지 않으면 개발 모드로 간주하여 모든 origin을 허용합니다.
fn cors_layer() -> CorsLayer {
    let allow_origin = match std::env::var("CORS_ORIGINS") {
        Ok(origins) if !origins.is_empty() => {
            let origins: Vec<_> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();

            if origins.is_empty() {
                warn!("CORS_ORIGINS에 유효한 origin이 없어 모든 origin을 허용합니다");
                AllowOrigin::any()
            } else {
                info!("CORS 허용 origin {}개 설정", origins.len());
                AllowOrigin::list(origins)
            }
        }
        _ => {
            warn!("CORS_ORIGINS 미설정, 모든 origin 허용 (개발 모드)");
            AllowOrigin::any()
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
            axum::http::header::ACCEPT,
        ])
        .max_age(Duration::from_secs(3600))
}

/// 전체 라우터 생성.
///
/// 인증 설정은 Extension으로 주입되어 JWT 추출기가 사용합니다.
fn create_router(state: Arc<AppState>, config: &AppConfig) -> Router {
    let auth_config = state.auth.clone();

    create_api_router()
        .with_state(state)
        .merge(swagger_ui_router())
        .layer(Extension(auth_config))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    // 설정 로드 (인증 시크릿 검증 포함, 실패 시 즉시 종료)
    let config = AppConfig::load_default().context("설정 로드 실패")?;

    // tracing 초기화
    init_logging(&config.logging).context("로깅 초기화 실패")?;

    info!("Storekeeper API 서버 시작...");

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("서버 주소 설정이 유효하지 않습니다")?;

    // AppState 생성 (DB 연결 포함)
    let state = Arc::new(create_app_state(&config).await);

    info!(
        version = %state.version,
        has_db = state.db_pool.is_some(),
        "애플리케이션 상태 초기화 완료"
    );

    // 라우터 생성
    let app = create_router(state, &config);

    info!(%addr, "API 서버 수신 대기");
    info!("Swagger UI: http://{}/swagger-ui", addr);
    info!("OpenAPI 스펙: http://{}/api-docs/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("서버 주소 바인딩 실패")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("서버 실행 실패")?;

    info!("서버가 정상 종료되었습니다");

    Ok(())
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM 시그널을 수신하면 종료합니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Ctrl+C 수신, 종료를 시작합니다...");
        }
        _ = terminate => {
            warn!("SIGTERM 수신, 종료를 시작합니다...");
        }
    }
}
