#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::{
    egui,
    egui::ViewportBuilder,
    NativeOptions,
};
use egui::Color32;
use tracing_subscriber::EnvFilter;

use cardreel::gui::{CardFace, CardStrip};
use cardreel::ReelConfig;

/* ───────────────────────── program entry ────────────────────────── */

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cardreel=debug")),
        )
        .init();

    let mut opts = NativeOptions::default();
    opts.viewport = ViewportBuilder::default()
        .with_inner_size([1080.0, 380.0])
        .with_decorations(true);

    eframe::run_native(
        "Destination Reel",
        opts,
        Box::new(move |cc| Box::new(DemoApp::new(&cc.egui_ctx))),
    )
}

/* ───────────────────────── demo app ─────────────────────────────── */

struct DemoApp {
    strip: CardStrip,
    last_destination: Option<String>,
}

impl DemoApp {
    fn new(ctx: &egui::Context) -> Self {
        Self {
            strip: CardStrip::new(ctx, destinations(), ReelConfig::default()),
            last_destination: None,
        }
    }
}

fn destinations() -> Vec<CardFace> {
    let seed: [(&str, &str, Color32); 8] = [
        ("Kyoto", "temples & tea houses", Color32::from_rgb(0x8e, 0x3b, 0x46)),
        ("Reykjavík", "geysers & northern lights", Color32::from_rgb(0x2b, 0x6d, 0x8c)),
        ("Marrakesh", "souks & spice markets", Color32::from_rgb(0xc0, 0x6b, 0x2c)),
        ("Patagonia", "granite peaks & glaciers", Color32::from_rgb(0x3a, 0x5a, 0x40)),
        ("Santorini", "caldera sunsets", Color32::from_rgb(0x27, 0x4c, 0x77)),
        ("Banff", "turquoise lakes", Color32::from_rgb(0x4a, 0x6f, 0xa5)),
        ("Zanzibar", "spice farms & dhows", Color32::from_rgb(0x9a, 0x6a, 0x2f)),
        ("Lisbon", "trams & azulejos", Color32::from_rgb(0x84, 0x50, 0x7b)),
    ];
    seed.iter()
        .map(|(title, caption, fill)| {
            CardFace::new(*title, *caption, *fill, 260.0).with_href(format!(
                "https://example.com/destinations/{}",
                title.to_lowercase()
            ))
        })
        .collect()
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Where next?");
                if let Some(dest) = &self.last_destination {
                    ui.weak(format!("last opened: {dest}"));
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(24.0);
            let out = self.strip.show(ui);
            if let Some(url) = out.navigated {
                self.last_destination = Some(url);
            }
        });
    }
}
