//! Client library for Apple's WeatherKit REST API.
//!
//! This crate defines:
//! - Developer token signing (ES256 JWT) with caching and lazy renewal
//! - Typed response models with units attached to every measurement
//! - Lookup of WeatherKit's symbolic values (condition codes, severities...)
//! - An async client over a pluggable HTTP transport
//!
//! ```no_run
//! # async fn run() -> anyhow::Result<()> {
//! use weatherkit_core::{Config, Coordinates, WeatherKitClient, WeatherQuery};
//!
//! let client = WeatherKitClient::from_config(&Config::load()?)?;
//! let weather = client
//!     .weather(Coordinates::new(52.52, 13.405)?, &WeatherQuery::default())
//!     .await?;
//! if let Some(current) = weather.current_weather {
//!     println!("{} {}", current.condition_code.label(), current.temperature);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod model;
pub mod token;
pub mod transport;
pub mod units;
pub mod vocabulary;

pub use client::WeatherKitClient;
pub use config::Config;
pub use error::{Error, Result};
pub use model::{Availability, Coordinates, DataSet, Weather, WeatherAlert, WeatherQuery};
pub use token::{KeySource, TokenManager};
pub use transport::{HttpTransport, ReqwestTransport};
pub use units::{Measurement, Unit, UnitSystem};
pub use vocabulary::{Code, Vocabulary};
