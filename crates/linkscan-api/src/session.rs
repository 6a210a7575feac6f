// Router login
//
// `POST /login.cgi` with the obfuscated password. The firmware answers
// with an HTML page that links to `index.asp;session_id=<token>`; that
// token authenticates the next request. There is no logout: sessions
// expire on the router after a few idle minutes.

use serde::Serialize;
use tracing::{debug, trace};

use crate::client::RouterClient;
use crate::error::Error;
use crate::password::EncodedPassword;
use crate::scrape::{SessionId, extract_session_id};

/// Form body of the login request, in the order the login page posts it.
#[derive(Debug, Serialize)]
struct LoginForm<'a> {
    http_username: &'a str,
    http_passwd: &'a str,
    action: &'static str,
    change_action: &'static str,
    submit_type: &'static str,
    submit_button: &'static str,
}

impl<'a> LoginForm<'a> {
    fn new(username: &'a str, password: &'a EncodedPassword) -> Self {
        Self {
            http_username: username,
            http_passwd: password.expose(),
            action: "Apply",
            change_action: "",
            submit_type: "",
            submit_button: "login",
        }
    }
}

impl RouterClient {
    /// Log in and return the session id scraped from the response.
    ///
    /// Only transport failures are errors. A rejected login is not
    /// distinguishable at the HTTP level; it shows up as an empty
    /// [`SessionId`] (no marker in the body).
    pub async fn login(
        &self,
        username: &str,
        password: &EncodedPassword,
    ) -> Result<SessionId, Error> {
        let url = self.login_url().clone();
        debug!("logging in at {}", url);

        let resp = self
            .http()
            .post(url)
            .form(&LoginForm::new(username, password))
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        let session = extract_session_id(&body);

        if session.is_empty() {
            debug!(%status, "login response carried no session id");
        } else {
            trace!(%status, session = session.as_str(), "session granted");
        }

        Ok(session)
    }
}
