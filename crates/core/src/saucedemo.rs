//! Step bindings for the SauceDemo login flow.
//!
//! ```gherkin
//! Given I am on the SauceDemo login page
//! When I enter username "standard_user"
//! And I enter password "secret_sauce"
//! And I click the login button
//! Then I should be navigated to the inventory page
//! ```

use tracing::info;

use crate::error::{Error, Result};
use crate::registry::{BoxFut, StepArgs, StepRegistry};
use crate::session::Session;

pub const LOGIN_URL: &str = "https://www.saucedemo.com/";
pub const INVENTORY_PATH: &str = "/inventory.html";

pub const USERNAME_INPUT: &str = "#user-name";
pub const PASSWORD_INPUT: &str = "#password";
pub const LOGIN_BUTTON: &str = "#login-button";
pub const ERROR_MESSAGE: &str = r#"[data-test="error"]"#;

pub fn register(registry: &mut StepRegistry) -> Result<()> {
	registry
		.given("I am on the SauceDemo login page", open_login_page)?
		.when("I enter username {string}", enter_username)?
		.when("I enter password {string}", enter_password)?
		.when("I click the login button", click_login)?
		.then("I should be navigated to the inventory page", expect_inventory_page)?
		.then("I should see the error message {string}", expect_error_message)?;
	Ok(())
}

fn open_login_page(session: &Session, _args: StepArgs) -> BoxFut<'_, Result<()>> {
	Box::pin(async move {
		info!(target = "steps", url = LOGIN_URL, "open login page");
		session.navigate(LOGIN_URL).await?;

		let landed = session.current_url().await?;
		if !landed.starts_with(LOGIN_URL) {
			return Err(Error::Navigation {
				url: LOGIN_URL.to_string(),
				reason: format!("landed on {landed}"),
			});
		}
		Ok(())
	})
}

fn enter_username(session: &Session, args: StepArgs) -> BoxFut<'_, Result<()>> {
	Box::pin(async move {
		let username = args.get(0)?;
		info!(target = "steps", %username, "enter username");
		session.set_field_value(USERNAME_INPUT, username).await
	})
}

fn enter_password(session: &Session, args: StepArgs) -> BoxFut<'_, Result<()>> {
	Box::pin(async move {
		let password = args.get(0)?;
		info!(target = "steps", chars = password.chars().count(), "enter password");
		session.set_field_value(PASSWORD_INPUT, password).await
	})
}

fn click_login(session: &Session, _args: StepArgs) -> BoxFut<'_, Result<()>> {
	Box::pin(async move {
		info!(target = "steps", "click login button");
		session.click(LOGIN_BUTTON).await
	})
}

fn expect_inventory_page(session: &Session, _args: StepArgs) -> BoxFut<'_, Result<()>> {
	Box::pin(async move {
		let url = session.current_url().await?;
		if !url.contains(INVENTORY_PATH) {
			return Err(Error::assertion("current URL contains", INVENTORY_PATH, url));
		}
		Ok(())
	})
}

fn expect_error_message(session: &Session, args: StepArgs) -> BoxFut<'_, Result<()>> {
	Box::pin(async move {
		let expected = args.get(0)?;
		let actual = session.element_text(ERROR_MESSAGE).await?;
		if actual != expected {
			return Err(Error::assertion("error message text", expected, actual));
		}
		Ok(())
	})
}
