//! HTML pages.

/// Shown on the home page when a query matches no song.
pub const NOT_FOUND_MESSAGE: &str = "Song not found. Please try another song.";

const STYLE: &str = "body{font-family:sans-serif;max-width:40rem;margin:3rem auto;padding:0 1rem}\
.error{color:#b00020}li{margin:.25rem 0}";

/// Escape text for use in HTML content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}</body>\n</html>\n",
        escape(title),
    )
}

fn search_form() -> &'static str {
    "<form action=\"/recommend\" method=\"post\">\n\
     <input type=\"text\" name=\"song\" placeholder=\"Enter a song name\" required>\n\
     <button type=\"submit\">Recommend</button>\n\
     </form>\n"
}

/// The search page, optionally with an error above the form.
pub fn home(error: Option<&str>) -> String {
    let error = error
        .map(|e| format!("<p class=\"error\">{}</p>\n", escape(e)))
        .unwrap_or_default();
    let body = format!("<h1>Song Recommender</h1>\n{error}{}", search_form());
    page("Song Recommender", &body)
}

/// The matched song and its recommendations.
pub fn result(song: &str, recommendations: &[&str]) -> String {
    let list = if recommendations.is_empty() {
        "<p>No other songs to recommend.</p>\n".to_string()
    } else {
        let items: String = recommendations
            .iter()
            .map(|title| format!("<li>{}</li>\n", escape(title)))
            .collect();
        format!("<ol>\n{items}</ol>\n")
    };

    let body = format!(
        "<h1>Because you like {}</h1>\n{list}<p><a href=\"/\">Search again</a></p>\n",
        escape(song)
    );
    page(&format!("Recommendations for {song}"), &body)
}
