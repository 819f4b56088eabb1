mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod pricing;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use config::environment::EnvironmentConfig;
use database::DatabaseConnection;
use middleware::cors::cors_middleware;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚘 VTC Quoting - API de presupuestos");
    info!("====================================");

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let pool = db_connection.pool().clone();

    // Crear router de la API
    let app_state = AppState::new(pool, EnvironmentConfig::default());

    let app = Router::new()
        .route("/test", get(test_endpoint))
        .nest(
            "/api/company",
            routes::company_routes::create_company_router(app_state.clone()),
        )
        .nest(
            "/api/vehicle",
            routes::vehicle_routes::create_vehicle_router(app_state.clone()),
        )
        .nest(
            "/api/client",
            routes::client_routes::create_client_router(app_state.clone()),
        )
        .nest(
            "/api/quote",
            routes::quote_routes::create_quote_router(app_state.clone()),
        )
        .nest(
            "/api/geocoding",
            routes::geocoding_routes::create_geocoding_router(),
        )
        .layer(cors_middleware())
        .with_state(app_state);

    // Puerto del servidor
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /test - Endpoint de prueba");
    info!("🏢 Endpoints - Company:");
    info!("   POST /api/company/register - Registrar empresa");
    info!("   POST /api/company/login - Login empresa");
    info!("   GET  /api/company/me - Obtener empresa actual");
    info!("   PUT  /api/company/pricing - Actualizar tarificación por defecto");
    info!("🚗 Endpoints - Vehicle:");
    info!("   POST /api/vehicle - Crear vehículo");
    info!("   GET  /api/vehicle - Listar vehículos");
    info!("   GET  /api/vehicle/:id - Obtener vehículo");
    info!("   PUT  /api/vehicle/:id - Actualizar vehículo");
    info!("   DELETE /api/vehicle/:id - Eliminar vehículo");
    info!("👤 Endpoints - Client:");
    info!("   POST /api/client - Crear cliente");
    info!("   GET  /api/client - Listar clientes");
    info!("   GET  /api/client/:id - Obtener cliente");
    info!("   PUT  /api/client/:id - Actualizar cliente");
    info!("   DELETE /api/client/:id - Eliminar cliente");
    info!("💶 Endpoints - Quote:");
    info!("   POST /api/quote/preview - Tarificar sin persistir (widget)");
    info!("   POST /api/quote - Crear presupuesto");
    info!("   GET  /api/quote - Listar presupuestos");
    info!("   GET  /api/quote/:id - Obtener presupuesto");
    info!("   DELETE /api/quote/:id - Eliminar presupuesto");
    info!("📍 Endpoints - Geocoding:");
    info!("   GET  /api/geocoding/forward - Resolver dirección a coordenadas");
    info!("   GET  /api/geocoding/route - Distancia y duración entre dos puntos");

    // Iniciar servidor en background
    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Error del servidor: {}", e);
                e
            })
    });

    // Esperar a que el servidor termine
    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Endpoint de prueba simple
async fn test_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "message": "¡API de presupuestos VTC funcionando correctamente!",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "service": "vtc-quoting"
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
