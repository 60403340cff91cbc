//! View builders.
//!
//! Each function renders one page as a complete HTML document. The markup
//! is deliberately plain; all user-supplied text goes through `escape`.

use axum::response::Html;
use userdesk_accounts::{FieldError, RegistrationForm};
use userdesk_database::UserAccount;

fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head><meta charset=\"utf-8\"><title>{title} - Userdesk</title></head>\n\
         <body>\n\
         <nav><a href=\"/\">Home</a> | <a href=\"/usersearch\">Search</a> | \
         <a href=\"/registration\">Register</a> | <a href=\"/userInfo\">My account</a> | \
         <a href=\"/admin\">Admin</a> | <a href=\"/login\">Login</a></nav>\n\
         {body}\n\
         </body>\n\
         </html>\n",
        title = escape(title),
    ))
}

fn error_banner(message: Option<&str>) -> String {
    match message {
        Some(message) => format!("<p class=\"error\">{}</p>\n", escape(message)),
        None => String::new(),
    }
}

pub fn home() -> Html<String> {
    layout(
        "Home",
        "<h1>Userdesk</h1>\n<p>User account management.</p>",
    )
}

pub fn search_form(flash_error: Option<&str>) -> Html<String> {
    let body = format!(
        "<h1>User search</h1>\n{}\
         <form method=\"post\" action=\"/searchaction\">\n\
         <label>Username <input type=\"text\" name=\"searchTerm\" value=\"\"></label>\n\
         <button type=\"submit\">Search</button>\n\
         </form>",
        error_banner(flash_error),
    );
    layout("User search", &body)
}

pub fn search_results(term: &str, result: Option<&UserAccount>) -> Html<String> {
    let result_markup = match result {
        Some(account) => format!(
            "<div class=\"search-result\">\n\
             <p>Username: {}</p>\n\
             <p>Role: {}</p>\n\
             </div>",
            escape(&account.username),
            escape(account.role.as_str()),
        ),
        None => "<p>No matching account.</p>".to_string(),
    };

    let body = format!(
        "<h1>Search results</h1>\n\
         <p>Search input: {}</p>\n\
         {result_markup}",
        escape(term),
    );
    layout("Search results", &body)
}

pub fn user_info(account: &UserAccount) -> Html<String> {
    let last_login = account.last_login_at.as_deref().unwrap_or("never");
    let body = format!(
        "<h1>My account</h1>\n\
         <p>Username: {}</p>\n\
         <p>Role: {}</p>\n\
         <p>Member since: {}</p>\n\
         <p>Last login: {}</p>\n\
         <form method=\"post\" action=\"/logout\"><button type=\"submit\">Log out</button></form>",
        escape(&account.username),
        escape(account.role.as_str()),
        escape(&account.created_at),
        escape(last_login),
    );
    layout("My account", &body)
}

pub fn admin(user_info: &str, accounts: &[UserAccount]) -> Html<String> {
    let mut rows = String::new();
    for account in accounts {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&account.username),
            escape(account.role.as_str()),
            escape(&account.created_at),
        ));
    }

    let body = format!(
        "<h1>Administration</h1>\n\
         <p>Signed in as {}</p>\n\
         <table>\n\
         <tr><th>Username</th><th>Role</th><th>Created</th></tr>\n\
         {rows}\
         </table>",
        escape(user_info),
    );
    layout("Administration", &body)
}

pub fn login(flash_error: Option<&str>) -> Html<String> {
    let body = format!(
        "<h1>Login</h1>\n{}\
         <form method=\"post\" action=\"/login\">\n\
         <label>Username <input type=\"text\" name=\"username\"></label>\n\
         <label>Password <input type=\"password\" name=\"password\"></label>\n\
         <button type=\"submit\">Sign in</button>\n\
         </form>",
        error_banner(flash_error),
    );
    layout("Login", &body)
}

pub fn logout_successful() -> Html<String> {
    layout(
        "Logout",
        "<h1>Logout</h1>\n<p>You have been logged out.</p>\n<p><a href=\"/login\">Sign in again</a></p>",
    )
}

pub fn registration(
    form: &RegistrationForm,
    errors: &[FieldError],
    error_message: Option<&str>,
) -> Html<String> {
    let mut error_list = String::new();
    if !errors.is_empty() {
        error_list.push_str("<ul class=\"field-errors\">\n");
        for error in errors {
            error_list.push_str(&format!("<li>{}</li>\n", escape(&error.to_string())));
        }
        error_list.push_str("</ul>\n");
    }

    let body = format!(
        "<h1>Registration</h1>\n\
         {banner}{error_list}\
         <form method=\"post\" action=\"/registration\">\n\
         <label>Username <input type=\"text\" name=\"username\" value=\"{username}\"></label>\n\
         <label>Password <input type=\"text\" name=\"password\" value=\"{password}\"></label>\n\
         <label>Repeat password <input type=\"text\" name=\"repeatPassword\" value=\"{repeat}\"></label>\n\
         <button type=\"submit\">Register</button>\n\
         </form>",
        banner = error_banner(error_message),
        username = escape(&form.username),
        password = escape(&form.password),
        repeat = escape(&form.repeat_password),
    );
    layout("Registration", &body)
}

pub fn registration_successful(username: Option<&str>) -> Html<String> {
    let detail = match username {
        Some(username) => format!("<p>Account {} has been created.</p>", escape(username)),
        None => "<p>Your account has been created.</p>".to_string(),
    };

    let body = format!(
        "<h1>Registration successful</h1>\n{detail}\n<p><a href=\"/login\">Sign in</a></p>"
    );
    layout("Registration successful", &body)
}

pub fn access_denied(user_info: Option<&str>, message: Option<&str>) -> Html<String> {
    let mut body = "<h1>403 - Access denied</h1>\n".to_string();

    if let Some(user_info) = user_info {
        body.push_str(&format!("<p>Signed in as {}</p>\n", escape(user_info)));
    }

    if let Some(message) = message {
        for line in message.lines() {
            body.push_str(&format!("<p>{}</p>\n", escape(line)));
        }
    }

    layout("Access denied", &body)
}
