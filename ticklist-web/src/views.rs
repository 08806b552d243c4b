/// HTML rendering
///
/// The view layer is plain functions building HTML strings — no template
/// engine. Every piece of user-supplied text goes through [`escape`]
/// before it is interpolated into markup.
use ticklist_shared::models::task::Task;

/// Escapes text for safe interpolation into HTML
pub fn escape(input: &str) -> String {
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

/// Shared page shell
fn layout(title: &str, nav: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title} — Ticklist</title>\n\
         </head>\n\
         <body>\n\
         <header><h1>Ticklist</h1><nav>{nav}</nav></header>\n\
         <main>\n{body}\n</main>\n\
         </body>\n\
         </html>\n",
        title = escape(title),
        nav = nav,
        body = body,
    )
}

fn flash_block(flash: Option<&str>) -> String {
    match flash {
        Some(msg) => format!("<p class=\"flash\">{}</p>\n", escape(msg)),
        None => String::new(),
    }
}

/// Navigation for an authenticated user
fn user_nav(username: &str) -> String {
    format!(
        "<span>Signed in as {}</span> <a href=\"/\">Tasks</a> \
         <a href=\"/add\">Add task</a> <a href=\"/logout\">Log out</a>",
        escape(username)
    )
}

/// Navigation for anonymous pages
fn anon_nav() -> String {
    "<a href=\"/login\">Log in</a> <a href=\"/register\">Register</a>".to_string()
}

/// The task list (GET /)
pub fn task_list_page(username: &str, tasks: &[Task], flash: Option<&str>) -> String {
    let mut body = flash_block(flash);

    if tasks.is_empty() {
        body.push_str("<p>No tasks yet. <a href=\"/add\">Add one</a>.</p>\n");
    } else {
        body.push_str("<ul class=\"tasks\">\n");
        for task in tasks {
            let status = if task.completed { "done" } else { "open" };
            let marker = if task.completed { "[x]" } else { "[ ]" };
            body.push_str(&format!(
                "<li class=\"{status}\">{marker} <strong>{title}</strong> — {description} \
                 <a href=\"/edit/{id}\">edit</a> <a href=\"/delete/{id}\">delete</a></li>\n",
                status = status,
                marker = marker,
                title = escape(&task.title),
                description = escape(&task.description),
                id = task.id,
            ));
        }
        body.push_str("</ul>\n");
    }

    layout("Your tasks", &user_nav(username), &body)
}

/// The login form (GET /login, and redisplay on failure)
pub fn login_page(flash: Option<&str>) -> String {
    let body = format!(
        "{flash}\
         <h2>Log in</h2>\n\
         <form method=\"post\" action=\"/login\">\n\
         <label>Email <input type=\"email\" name=\"email\"></label>\n\
         <label>Password <input type=\"password\" name=\"password\"></label>\n\
         <button type=\"submit\">Log in</button>\n\
         </form>\n\
         <p>No account? <a href=\"/register\">Register</a>.</p>\n",
        flash = flash_block(flash),
    );

    layout("Log in", &anon_nav(), &body)
}

/// The registration form (GET /register, and redisplay on failure)
pub fn register_page(flash: Option<&str>) -> String {
    let body = format!(
        "{flash}\
         <h2>Register</h2>\n\
         <form method=\"post\" action=\"/register\">\n\
         <label>Username <input type=\"text\" name=\"username\"></label>\n\
         <label>Email <input type=\"email\" name=\"email\"></label>\n\
         <label>Password <input type=\"password\" name=\"password\"></label>\n\
         <button type=\"submit\">Create account</button>\n\
         </form>\n\
         <p>Already registered? <a href=\"/login\">Log in</a>.</p>\n",
        flash = flash_block(flash),
    );

    layout("Register", &anon_nav(), &body)
}

/// The add-task form (GET /add)
pub fn add_task_page(username: &str) -> String {
    let body = "<h2>Add task</h2>\n\
         <form method=\"post\" action=\"/add\">\n\
         <label>Title <input type=\"text\" name=\"title\"></label>\n\
         <label>Description <textarea name=\"description\"></textarea></label>\n\
         <button type=\"submit\">Add</button>\n\
         </form>\n"
        .to_string();

    layout("Add task", &user_nav(username), &body)
}

/// The edit-task form, pre-filled with the task (GET /edit/:id)
pub fn edit_task_page(username: &str, task: &Task) -> String {
    let checked = if task.completed { " checked" } else { "" };
    let body = format!(
        "<h2>Edit task</h2>\n\
         <form method=\"post\" action=\"/edit/{id}\">\n\
         <label>Title <input type=\"text\" name=\"title\" value=\"{title}\"></label>\n\
         <label>Description <textarea name=\"description\">{description}</textarea></label>\n\
         <label><input type=\"checkbox\" name=\"completed\"{checked}> Completed</label>\n\
         <button type=\"submit\">Save</button>\n\
         </form>\n",
        id = task.id,
        title = escape(&task.title),
        description = escape(&task.description),
        checked = checked,
    );

    layout("Edit task", &user_nav(username), &body)
}

/// Explicit not-found state for a missing or not-owned task
pub fn not_found_page() -> String {
    layout(
        "Not found",
        &anon_nav(),
        "<h2>Not found</h2>\n<p>That task does not exist. <a href=\"/\">Back to your tasks</a>.</p>\n",
    )
}

/// Generic message page (400/500 responses)
pub fn message_page(title: &str, message: &str) -> String {
    let body = format!(
        "<h2>{}</h2>\n<p>{}</p>\n<p><a href=\"/\">Back to your tasks</a></p>\n",
        escape(title),
        escape(message)
    );
    layout(title, &anon_nav(), &body)
}
