use crate::recipes::repo_types::Recipe;

use super::view::{self, BrowseView, Mode, PAGE_SIZE_CHOICES};

const STYLE: &str = r#"
:root { --border-color: #e2e8f0; --text-primary: #1a202c; --text-secondary: #64748b; --text-tertiary: #94a3b8; }
body { font-family: system-ui, sans-serif; background: #f8fafc; color: var(--text-primary); margin: 0; }
.container { max-width: 1100px; margin: 0 auto; padding: 2rem 1rem; }
.card { background: #fff; border: 1px solid var(--border-color); border-radius: 8px; }
.filters { padding: 1.5rem; margin-bottom: 2rem; display: grid; grid-template-columns: repeat(auto-fit, minmax(150px, 1fr)); gap: 1rem; }
.input { padding: 0.5rem; border: 1px solid var(--border-color); border-radius: 6px; }
.btn { padding: 0.5rem 1rem; border: 1px solid var(--border-color); border-radius: 6px; background: #fff; color: inherit; text-decoration: none; }
.btn.disabled { opacity: 0.4; pointer-events: none; }
table { width: 100%; border-collapse: collapse; }
th, td { text-align: left; padding: 0.75rem; border-bottom: 1px solid var(--border-color); }
tbody tr:hover { background: #f1f5f9; }
td a { color: inherit; text-decoration: none; }
.badge { background: #eef2ff; color: #4338ca; padding: 0.15rem 0.5rem; border-radius: 999px; font-size: 0.8rem; display: inline-block; }
.star { color: #f59e0b; }
.star-empty { color: #e2e8f0; }
.state-empty { padding: 3rem; text-align: center; color: var(--text-secondary); }
.pager { display: flex; justify-content: space-between; align-items: center; margin-top: 1.5rem; color: var(--text-secondary); font-size: 0.875rem; }
.drawer-overlay { position: fixed; inset: 0; background: rgba(15, 23, 42, 0.4); }
.drawer { position: fixed; top: 0; right: 0; bottom: 0; width: min(480px, 100%); background: #fff; padding: 1.5rem; overflow-y: auto; display: flex; flex-direction: column; gap: 1.5rem; }
details summary { cursor: pointer; }
"#;

pub fn page(view: &BrowseView) -> String {
    let mut out = String::with_capacity(16 * 1024);
    out.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    out.push_str("<title>Culinary Compass</title>\n<style>");
    out.push_str(STYLE);
    out.push_str("</style>\n</head>\n<body>\n<div class=\"container\">\n");
    out.push_str(
        "<header><h1>Culinary Compass</h1>\
         <p>Explore thousands of delicious recipes</p></header>\n",
    );

    filter_form(&mut out, view);
    recipe_table(&mut out, view);
    if let Mode::Browse { page } = view.mode {
        pager(&mut out, view, page);
    }
    if let Some(recipe) = &view.selected {
        drawer(&mut out, view, recipe);
    }

    out.push_str("</div>\n</body>\n</html>\n");
    out
}

pub fn error_page() -> String {
    "<!doctype html>\n<html lang=\"en\"><head><meta charset=\"utf-8\"><title>Culinary Compass</title></head>\
     <body><h1>Something went wrong</h1><p>Recipes could not be loaded. Please try again.</p></body></html>\n"
        .to_string()
}

fn filter_form(out: &mut String, view: &BrowseView) {
    let f = &view.filters;
    out.push_str("<form class=\"card filters\" method=\"get\" action=\"/\">\n");
    let inputs = [
        ("title", "Search Title...", &f.title),
        ("cuisine", "Filter Cuisine...", &f.cuisine),
        ("rating", "Rating (e.g. >=4)", &f.rating),
        ("calories", "Calories (e.g. <=500)", &f.calories),
        ("total_time", "Total time (e.g. <60)", &f.total_time),
    ];
    for (name, placeholder, value) in inputs {
        out.push_str(&format!(
            "<input class=\"input\" name=\"{name}\" placeholder=\"{}\" value=\"{}\">\n",
            escape(placeholder),
            escape(value.as_deref().unwrap_or_default()),
        ));
    }

    out.push_str("<label>Per Page: <select class=\"input\" name=\"limit\">");
    for choice in PAGE_SIZE_CHOICES {
        let selected = if choice == view.limit { " selected" } else { "" };
        out.push_str(&format!("<option value=\"{choice}\"{selected}>{choice}</option>"));
    }
    out.push_str("</select></label>\n");
    out.push_str("<button class=\"btn\" type=\"submit\">Search</button>\n");
    out.push_str("<a class=\"btn\" href=\"/\">Clear</a>\n</form>\n");
}

fn recipe_table(out: &mut String, view: &BrowseView) {
    out.push_str("<div class=\"card table-container\">\n");
    if view.recipes.is_empty() {
        out.push_str(
            "<div class=\"state-empty\"><h3>No Recipes Found</h3>\
             <p>Try adjusting your search filters.</p></div>\n</div>\n",
        );
        return;
    }

    out.push_str(
        "<table>\n<thead><tr><th style=\"width: 40%\">Title</th><th>Cuisine</th>\
         <th>Rating</th><th>Total Time</th><th>Serves</th></tr></thead>\n<tbody>\n",
    );
    for recipe in &view.recipes {
        let href = view.href(view.current_page(), Some(recipe.id));
        out.push_str(&format!(
            "<tr><td><a href=\"{}\">{}</a></td><td><span class=\"badge\">{}</span></td>\
             <td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&href),
            escape(&recipe.title),
            escape(recipe.cuisine.as_deref().unwrap_or("Unknown")),
            rating_cell(recipe.rating),
            view::minutes(recipe.total_time, "min"),
            escape(recipe.serves.as_deref().unwrap_or_default()),
        ));
    }
    out.push_str("</tbody>\n</table>\n</div>\n");
}

fn rating_cell(rating: Option<f64>) -> String {
    match view::stars(rating) {
        Some(stars) => format!(
            "<span class=\"star\">{}<span class=\"star-empty\">{}</span></span> <small>({})</small>",
            "★".repeat(stars.filled),
            "★".repeat(stars.empty),
            rating.map(|r| r.to_string()).unwrap_or_default(),
        ),
        None => "N/A".to_string(),
    }
}

fn pager(out: &mut String, view: &BrowseView, page: i64) {
    out.push_str(&format!(
        "<div class=\"pager\"><span>Showing page {page} of {} ({} total)</span><div>",
        view.page_count(),
        view.total,
    ));
    nav_link(out, "Previous", view.has_previous().then(|| view.href(Some(page - 1), None)));
    nav_link(out, "Next", view.has_next().then(|| view.href(Some(page + 1), None)));
    out.push_str("</div></div>\n");
}

fn nav_link(out: &mut String, label: &str, href: Option<String>) {
    match href {
        Some(href) => out.push_str(&format!("<a class=\"btn\" href=\"{}\">{label}</a> ", escape(&href))),
        None => out.push_str(&format!("<span class=\"btn disabled\">{label}</span> ")),
    }
}

fn drawer(out: &mut String, view: &BrowseView, recipe: &Recipe) {
    let close = escape(&view.href(view.current_page(), None));
    out.push_str(&format!("<a class=\"drawer-overlay\" href=\"{close}\"></a>\n"));
    out.push_str("<aside class=\"drawer open\">\n");
    out.push_str(&format!(
        "<div><a class=\"btn\" href=\"{close}\" style=\"float: right\">✕</a>\
         <h2>{}</h2><span class=\"badge\">{}</span></div>\n",
        escape(&recipe.title),
        escape(recipe.cuisine.as_deref().unwrap_or_default()),
    ));
    out.push_str(&format!(
        "<section><h3>Description</h3><p>{}</p></section>\n",
        escape(recipe.description.as_deref().unwrap_or_default()),
    ));
    out.push_str(&format!(
        "<details class=\"card\" style=\"padding: 1rem\"><summary><strong>Total Time: {}</strong></summary>\
         <div><small>Prep Time</small><div>{}</div><small>Cook Time</small><div>{}</div></div></details>\n",
        view::minutes(recipe.total_time, "mins"),
        view::minutes(recipe.prep_time, "mins"),
        view::minutes(recipe.cook_time, "mins"),
    ));

    out.push_str("<section><h3>Nutrition</h3>");
    match view::nutrient_rows(recipe.nutrients.as_ref()) {
        Some(rows) => {
            out.push_str("<div class=\"card\"><table><tbody>");
            for (key, value) in rows {
                out.push_str(&format!(
                    "<tr><td>{}</td><td style=\"text-align: right\">{}</td></tr>",
                    escape(&key),
                    escape(&value),
                ));
            }
            out.push_str("</tbody></table></div>");
        }
        None => out.push_str("<p>No nutrition info available.</p>"),
    }
    out.push_str("</section>\n</aside>\n");
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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
