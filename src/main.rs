use salon_booking::services::{catalog, restore_session};
use salon_booking::utils::{convert_minutes, format_currency};
use salon_booking::{AppState, Config};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Inizializza il logging (RUST_LOG, altrimenti info)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Carica la configurazione da .env e variabili d'ambiente
    let config = Config::from_env()?;
    config.log_info();

    // Costruisce lo stato e ripristina l'eventuale sessione salvata
    let state = AppState::new(&config)?;
    match restore_session(&state).await? {
        Some(user) => info!(user_id = user.id, role = %user.role, "Welcome back {}", user.username),
        None => info!("No active session"),
    }

    // Stampa il catalogo dei servizi prenotabili
    match catalog::list_services(&state).await {
        Ok(services) => {
            for service in services.iter().filter(|s| s.is_bookable()) {
                println!(
                    "{:<30} {:>12}  {}",
                    service.name,
                    format_currency(service.price),
                    convert_minutes(service.duration)
                );
            }
        }
        Err(err) => warn!(error = %err, "Could not load the service catalog"),
    }

    Ok(())
}
