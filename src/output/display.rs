use url::Url;

use crate::probe::ProbeResult;

const GREEN: &str = "\x1b[92m";
const YELLOW: &str = "\x1b[93m";
const RED: &str = "\x1b[91m";
const BLUE: &str = "\x1b[94m";
const CYAN: &str = "\x1b[96m";
const RESET: &str = "\x1b[0m";

/// Broad class of an HTTP status as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatusClass {
    Success,
    Redirect,
    ClientError,
    ServerError,
    Unreachable,
    Other,
}

impl StatusClass {
    pub fn of(status: u16) -> Self {
        match status {
            0 => StatusClass::Unreachable,
            200..=299 => StatusClass::Success,
            300..=399 => StatusClass::Redirect,
            400..=499 => StatusClass::ClientError,
            500.. => StatusClass::ServerError,
            _ => StatusClass::Other,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            StatusClass::Success => "2xx",
            StatusClass::Redirect => "3xx",
            StatusClass::ClientError => "4xx",
            StatusClass::ServerError => "5xx",
            StatusClass::Unreachable => "unreachable",
            StatusClass::Other => "other",
        }
    }

    pub fn color_code(&self) -> &str {
        match self {
            StatusClass::Success => GREEN,
            StatusClass::Redirect => BLUE,
            StatusClass::ClientError => YELLOW,
            StatusClass::ServerError | StatusClass::Unreachable => RED,
            StatusClass::Other => RESET,
        }
    }
}

fn paint(text: &str, color: &str, enabled: bool) -> String {
    if enabled {
        format!("{}{}{}", color, text, RESET)
    } else {
        text.to_string()
    }
}

/// `domain - status`, plus `→ host` when the probe ended on another host.
pub fn format_result(result: &ProbeResult, color: bool) -> String {
    let class = StatusClass::of(result.status_code);
    let status_text = if result.status_code == 0 {
        "ERROR".to_string()
    } else {
        result.status_code.to_string()
    };
    let mut line = format!("{} - {}", result.domain, paint(&status_text, class.color_code(), color));

    if result.redirected {
        let host = result.final_host.clone().or_else(|| {
            result
                .final_url
                .as_deref()
                .and_then(|u| Url::parse(u).ok())
                .and_then(|u| u.host_str().map(String::from))
        });
        if let Some(host) = host {
            line.push_str(" → ");
            line.push_str(&paint(&host, CYAN, color));
        }
    }
    line
}

/// Results sorted by domain, one formatted line each.
pub fn format_results(results: &[ProbeResult], color: bool) -> Vec<String> {
    let mut sorted: Vec<&ProbeResult> = results.iter().collect();
    sorted.sort_by(|a, b| a.domain.cmp(&b.domain));
    sorted.into_iter().map(|r| format_result(r, color)).collect()
}

/// e.g. `2xx: 4 | 3xx: 1 | unreachable: 2`, in class order.
pub fn status_summary(results: &[ProbeResult]) -> String {
    let mut counts: Vec<(StatusClass, usize)> = Vec::new();
    for r in results {
        let class = StatusClass::of(r.status_code);
        match counts.iter_mut().find(|(c, _)| *c == class) {
            Some((_, n)) => *n += 1,
            None => counts.push((class, 1)),
        }
    }
    counts.sort();
    counts
        .iter()
        .map(|(c, n)| format!("{}: {}", c.label(), n))
        .collect::<Vec<_>>()
        .join(" | ")
}
