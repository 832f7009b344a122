#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod fetch_worker;
mod views;

use std::sync::Arc;

use app::FinflowApp;
use ff_api::{ApiClient, Session};

fn api_base_url() -> String {
    std::env::var("FINFLOW_API_URL").unwrap_or_else(|_| "http://localhost:8000".to_string())
}

fn main() -> eframe::Result<()> {
    let session = Session::restore();
    let client = match ApiClient::new(api_base_url(), session) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            eprintln!("Failed to initialize HTTP client: {e}");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_title("Finflow"),
        ..Default::default()
    };

    eframe::run_native(
        "Finflow",
        options,
        Box::new(|cc| Ok(Box::new(FinflowApp::new(cc, client)))),
    )
}
