//! Behaviour-driven step bindings for the SauceDemo login flow.
//!
//! Human-readable scenario steps are matched against registered
//! [`StepPattern`]s and dispatched to async handlers that drive a browser
//! through the [`BrowserDriver`] seam:
//!
//! ```ignore
//! use std::sync::Arc;
//! use steps::{Runner, RunConfig, Scenario, StepRegistry, WebDriverFactory};
//!
//! let registry = Arc::new(StepRegistry::saucedemo()?);
//! let factory = Arc::new(WebDriverFactory::new(RunConfig::default()));
//! let runner = Runner::new(registry, factory);
//!
//! let scenario = Scenario::new("standard user logs in")
//!     .given("I am on the SauceDemo login page")
//!     .when(r#"I enter username "standard_user""#)
//!     .and(r#"I enter password "secret_sauce""#)
//!     .and("I click the login button")
//!     .then("I should be navigated to the inventory page");
//!
//! let report = runner.run_scenario(&scenario).await;
//! assert!(report.passed);
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod feature;
pub mod pattern;
pub mod registry;
pub mod report;
pub mod runner;
pub mod saucedemo;
pub mod scenario;
pub mod session;
pub mod sim;
pub mod webdriver;

pub use config::RunConfig;
pub use driver::BrowserDriver;
pub use error::{Error, ErrorKind, Result};
pub use pattern::StepPattern;
pub use registry::{BoxFut, Phase, StepArgs, StepDefinition, StepFn, StepMatch, StepRegistry};
pub use report::{RunReport, ScenarioReport, StepReport, StepStatus};
pub use runner::{Runner, check_defined};
pub use scenario::{Scenario, ScenarioStep};
pub use session::{Session, SessionFactory, SimFactory, WebDriverFactory};
pub use sim::SauceDemoSim;
pub use webdriver::WebDriverClient;
pub use sd_protocol::BrowserName;
