//! # Booking Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the gateway and mail adapters
//! - Create the booking service and notification outbox worker
//! - Start the HTTP server

mod config;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use booking_gateway::{GraphMailer, NotificationOutbox, OrderStore, OutboxWorker, RazorpayGateway};
use booking_hex::{BookingService, ReceiptSettings, inbound::HttpServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,booking_app=debug,booking_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Starting booking server on port {}", config.port);

    // Build the outbound adapters
    let gateway = RazorpayGateway::new(&config.razorpay_key_id, &config.razorpay_key_secret);
    let mailer = Arc::new(GraphMailer::new(
        &config.graph_tenant_id,
        &config.graph_client_id,
        &config.graph_client_secret,
        &config.sender_email,
    ));

    let orders = Arc::new(OrderStore::new());
    let outbox = Arc::new(NotificationOutbox::new());

    // Background retry of failed receipt notifications
    let worker = OutboxWorker::new(outbox.clone(), mailer.clone());
    tokio::spawn(worker.run());

    // Create the booking service
    let service = BookingService::new(
        gateway,
        mailer,
        orders,
        outbox,
        ReceiptSettings {
            internal_recipients: config.internal_recipients.clone(),
            contact_phones: config.contact_phones.clone(),
        },
    );

    // Create and run the HTTP server
    let server = HttpServer::with_rate_limit(service, config.rate_limit_per_minute);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    Ok(())
}
