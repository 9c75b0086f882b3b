//! `ezfix normalize <url>...` – show what `fix` would do to single URLs.

use ezfix_core::ezproxy;

/// One output line per URL: `changed` or `same`, a tab, then the result.
pub fn format_line(url: &str) -> String {
    let n = ezproxy::normalize(url);
    let status = if n.changed { "changed" } else { "same" };
    format!("{status}\t{}", n.url)
}

pub fn run_normalize(urls: &[String]) {
    for url in urls {
        println!("{}", format_line(url));
    }
}
