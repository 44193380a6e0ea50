//! Terminal front-end.
//!
//! Drives the same controller as the browser build: the image path given on
//! the command line is treated like a drop, decoded, submitted, and the
//! resulting cards are printed in order.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use base64::Engine as _;
use clap::Parser;
use pictag_core::{
    AnalysisOutcome, CardDescriptor, ClientConfig, ClientError, Controller, Effect, FileInfo,
    LogLevel, MemoryStore, Message, PreferenceStore, ViewState,
};

/// Host used when the configured endpoint is a bare path.
pub const DEFAULT_HOST: &str = "http://127.0.0.1:5000";

/// Width of the printed confidence bar, in characters.
const BAR_WIDTH: usize = 20;

#[derive(Parser, Debug)]
#[command(name = "pictag-native")]
#[command(about = "Classify an image with a prediction endpoint")]
pub struct Args {
    /// Image file to classify
    pub image: PathBuf,

    /// Prediction endpoint URL (overrides the config file)
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level: error, warn, info, debug or trace
    #[arg(long)]
    pub log_level: Option<String>,
}

/// Parse arguments, run one classification and return the process exit code.
pub fn run_cli() -> i32 {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match ClientConfig::load_from_path(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                return 2;
            }
        },
        None => ClientConfig::default(),
    };
    if let Some(endpoint) = args.endpoint {
        config.endpoint = endpoint;
    }
    if let Some(name) = args.log_level.as_deref() {
        match LogLevel::from_name(name) {
            Some(level) => config.log_level = level,
            None => {
                eprintln!("Error: unknown log level '{}'", name);
                return 2;
            }
        }
    }
    if config.endpoint.starts_with('/') {
        config.endpoint = format!("{}{}", DEFAULT_HOST, config.endpoint);
    }

    env_logger::Builder::new()
        .filter_level(config.log_level.to_level_filter())
        .init();

    let mut runner = NativeRunner::new(config);
    match runner.classify(&args.image) {
        Ok(ViewState::Results) => 0,
        Ok(view) => {
            log::debug!("Finished in view state {}", view.name());
            1
        }
        Err(e) => {
            log::error!("{}", e);
            1
        }
    }
}

/// Executes controller effects against the filesystem, the network and stdout.
pub struct NativeRunner {
    controller: Controller<PathBuf>,
    client: reqwest::blocking::Client,
    config: ClientConfig,
    queue: VecDeque<Message<PathBuf>>,
}

impl NativeRunner {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            controller: Controller::new(PreferenceStore::new(Box::new(MemoryStore::new()))),
            client: reqwest::blocking::Client::new(),
            config,
            queue: VecDeque::new(),
        }
    }

    /// Stage `path`, analyze it and return the view state the page ends in.
    pub fn classify(&mut self, path: &Path) -> Result<ViewState, ClientError> {
        let effects = self.controller.start();
        self.apply(effects)?;

        self.queue.push_back(Message::FileDropped(Some(file_info(path))));
        self.drain()?;

        if self.controller.selected().is_none() {
            return Ok(self.controller.view());
        }

        self.queue.push_back(Message::AnalyzeClicked);
        self.drain()?;
        Ok(self.controller.view())
    }

    fn drain(&mut self) -> Result<(), ClientError> {
        while let Some(message) = self.queue.pop_front() {
            let effects = self.controller.update(message);
            self.apply(effects)?;
        }
        Ok(())
    }

    fn apply(&mut self, effects: Vec<Effect<PathBuf>>) -> Result<(), ClientError> {
        for effect in effects {
            match effect {
                Effect::ReadFile { token, file } => {
                    let result = read_data_url(&file).map_err(|e| e.to_string());
                    self.queue.push_back(Message::FileDecoded { token, result });
                }
                Effect::Submit { token, file } => {
                    let outcome = AnalysisOutcome::from_body(self.post_file(&file));
                    self.queue
                        .push_back(Message::AnalysisResolved { token, outcome });
                }
                Effect::RenderCards(cards) => print_cards(&cards),
                Effect::Notify(notification) => {
                    eprintln!("{} {}", notification.kind.icon(), notification.message);
                }
                Effect::ShowView(visibility) => log::debug!("View: {:?}", visibility),
                Effect::ShowPreview { .. }
                | Effect::OpenPicker
                | Effect::ClearPicker
                | Effect::SetDragOver(_)
                | Effect::SetDarkMode(_)
                | Effect::DismissNotification(_) => {}
            }
        }
        Ok(())
    }

    fn post_file(&self, file: &FileInfo<PathBuf>) -> Result<String, ClientError> {
        use reqwest::blocking::multipart::{Form, Part};

        let bytes =
            std::fs::read(&file.handle).map_err(|e| ClientError::file_read(e.to_string()))?;
        let part = Part::bytes(bytes)
            .file_name(file.name.clone())
            .mime_str(&file.mime)
            .map_err(|e| ClientError::transport(e.to_string()))?;
        let form = Form::new().part(self.config.upload_field.clone(), part);

        let response = self
            .client
            .post(&self.config.endpoint)
            .multipart(form)
            .send()
            .map_err(|e| ClientError::transport(e.to_string()))?;
        log::debug!("{} answered {}", self.config.endpoint, response.status());

        response
            .text()
            .map_err(|e| ClientError::transport(e.to_string()))
    }
}

/// Describe a path the way a browser describes a dropped file.
pub fn file_info(path: &Path) -> FileInfo<PathBuf> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mime = mime_guess::from_path(path)
        .first()
        .map(|m| m.essence_str().to_string())
        .unwrap_or_default();
    FileInfo::new(path.to_path_buf(), name, mime)
}

fn read_data_url(file: &FileInfo<PathBuf>) -> Result<String, ClientError> {
    let bytes = std::fs::read(&file.handle).map_err(|e| ClientError::file_read(e.to_string()))?;
    Ok(format!(
        "data:{};base64,{}",
        file.mime,
        base64::engine::general_purpose::STANDARD.encode(bytes)
    ))
}

fn print_cards(cards: &[CardDescriptor]) {
    for card in cards {
        println!(
            "{} {:<28} [{}] {}",
            card.emoji,
            card.label,
            text_bar(card.confidence),
            card.confidence_text
        );
    }
}

/// Fixed-width text bar, clamped to 0-100%.
fn text_bar(confidence: f64) -> String {
    let filled = ((confidence.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), " ".repeat(BAR_WIDTH - filled))
}
