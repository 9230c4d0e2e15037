//! Server-rendered HTML pages.

const STYLE: &str = "body{font-family:sans-serif;max-width:40rem;margin:3rem auto;padding:0 1rem}\
.notice{background:#fff4d6;border:1px solid #e0b84c;padding:.75rem}\
.error{background:#fde2e2;border:1px solid #d66;padding:.75rem}";

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{title}</title>\
         <style>{STYLE}</style></head>\n<body>\n<h1>{title}</h1>\n{body}\n</body>\n</html>\n"
    )
}

pub fn index(busy: bool) -> String {
    let notice = if busy {
        "<p class=\"notice\">A ranking run is in progress. Uploads are refused until it finishes.</p>\n"
    } else {
        ""
    };
    layout(
        "Leaderboard standings",
        &format!(
            "{notice}<form action=\"/upload\" method=\"post\" enctype=\"multipart/form-data\">\n\
             <p>Select the leaderboard screenshots in the order they should be read.</p>\n\
             <input type=\"file\" name=\"file\" multiple>\n\
             <button type=\"submit\">Rank</button>\n</form>"
        ),
    )
}

pub fn busy() -> String {
    layout(
        "Busy",
        "<p class=\"notice\">Another upload is being ranked right now. Try again in a moment.</p>\n\
         <p><a href=\"/\">Back</a></p>",
    )
}

pub fn download() -> String {
    layout(
        "Standings ready",
        "<p><a href=\"/getfile\">Download the standings (CSV)</a></p>\n<p><a href=\"/\">Rank another upload</a></p>",
    )
}

pub fn error(message: &str) -> String {
    layout(
        "Something went wrong",
        &format!(
            "<p class=\"error\">{}</p>\n<p><a href=\"/\">Back</a></p>",
            html_escape::encode_text(message)
        ),
    )
}
