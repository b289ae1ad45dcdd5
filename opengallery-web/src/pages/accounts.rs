use maud::{html, Markup};

use super::layout::{error_list, input_field, page};
use crate::context::RequestContext;
use crate::forms::{FormErrors, SignupForm};

pub fn signup(ctx: &RequestContext, form: &SignupForm, errors: &FormErrors) -> Markup {
    let content = html! {
        h1 { "Sign up" }
        form method="post" action="/accounts/signup" {
            (error_list(errors.general()))
            (input_field("Username", "username", "text", &form.username, errors))
            (input_field("Password", "password1", "password", "", errors))
            (input_field("Password confirmation", "password2", "password", "", errors))
            button type="submit" { "Sign up" }
        }
        p { "Already registered? " a href="/accounts/login" { "Log in" } }
    };

    page(ctx, "Sign up", content)
}

pub fn login(ctx: &RequestContext, username: &str, errors: &FormErrors) -> Markup {
    let content = html! {
        h1 { "Log in" }
        form method="post" action="/accounts/login" {
            (error_list(errors.general()))
            (input_field("Username", "username", "text", username, errors))
            (input_field("Password", "password", "password", "", errors))
            button type="submit" { "Log in" }
        }
        p { "No account yet? " a href="/accounts/signup" { "Sign up" } }
    };

    page(ctx, "Log in", content)
}
