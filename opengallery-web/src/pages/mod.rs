//! HTML pages, rendered with maud
//!
//! Page functions take the [`RequestContext`](crate::context::RequestContext)
//! and the data to show and return [`maud::Markup`]; handlers turn the markup
//! into a response with `RequestContext::render`. Everything interpolated into
//! a template is HTML-escaped.

pub mod accounts;
pub mod admin;
pub mod artist;
pub mod errors;
pub mod gallery;
pub mod home;
pub mod layout;

/// Submits the bulk application form in the background and reloads the list.
pub const ADMIN_JS: &str = r#"document.addEventListener("DOMContentLoaded", function () {
  var form = document.getElementById("process-applications");
  if (!form) { return; }
  var result = document.getElementById("process-result");
  form.addEventListener("submit", function (event) {
    event.preventDefault();
    fetch(form.action, {
      method: "POST",
      credentials: "same-origin",
      headers: { "Content-Type": "application/x-www-form-urlencoded" },
      body: new URLSearchParams(new FormData(form)).toString()
    })
      .then(function (response) { return response.json(); })
      .then(function (data) {
        result.textContent = data.message;
        if (data.success) { window.setTimeout(function () { window.location.reload(); }, 800); }
      })
      .catch(function () { result.textContent = "Request failed."; });
  });
});
"#;
