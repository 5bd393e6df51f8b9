//! Server-side page rendering. The whole UI is one form plus result cards, so
//! plain string assembly stands in for a template engine.

use chrono::{FixedOffset, Utc};
use common::models::{DailyForecast, WeatherReport};

/// What the page needs to know. Exactly one of `report` and `error` is set on
/// a POST response; both stay empty on the initial GET.
#[derive(Default)]
pub struct PageView<'a> {
    pub report: Option<&'a WeatherReport>,
    pub error: Option<&'a str>,
    pub input_city: &'a str,
}

pub fn page(view: &PageView) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">");
    html.push_str("<title>Weather</title>");
    html.push_str(STYLE);
    html.push_str("</head><body><main><h1>Weather</h1>");
    html.push_str(&search_form(view.input_city));
    if let Some(message) = view.error {
        html.push_str(&format!("<p class=\"error\">{}</p>", escape(message)));
    }
    if let Some(report) = view.report {
        html.push_str(&current_card(report));
        html.push_str(&forecast_section(&report.forecast));
    }
    html.push_str("</main>");
    html.push_str(SCRIPT);
    html.push_str("</body></html>");
    html
}

fn search_form(input_city: &str) -> String {
    format!(
        concat!(
            "<form id=\"weather-form\" method=\"post\" action=\"/\" autocomplete=\"off\">",
            "<input type=\"text\" id=\"city\" name=\"city\" placeholder=\"Enter a city\" value=\"{city}\">",
            "<ul id=\"suggestions\" hidden></ul>",
            "<input type=\"hidden\" id=\"lat\" name=\"lat\">",
            "<input type=\"hidden\" id=\"lon\" name=\"lon\">",
            "<button type=\"submit\">Search</button>",
            "<button type=\"button\" id=\"locate\">Get My Location</button>",
            "</form>"
        ),
        city = escape(input_city)
    )
}

fn current_card(report: &WeatherReport) -> String {
    let w = &report.current;
    format!(
        concat!(
            "<section class=\"weather-card\">",
            "<h2>{city}</h2>",
            "<p class=\"local-time\">Local time {time}</p>",
            "<img src=\"https://openweathermap.org/img/wn/{icon}@2x.png\" alt=\"{desc}\">",
            "<p class=\"temp\">{temp:.1}&deg;C, {desc}</p>",
            "<p>Feels like {feels:.1}&deg;C &middot; Humidity {humidity}% &middot; Wind {wind} m/s</p>",
            "</section>"
        ),
        city = escape(&w.city),
        time = local_time(w.timezone_offset),
        icon = escape(&w.icon),
        desc = escape(&w.description),
        temp = w.temp,
        feels = w.feels_like,
        humidity = w.humidity,
        wind = w.wind_speed,
    )
}

fn forecast_section(days: &[DailyForecast]) -> String {
    if days.is_empty() {
        return String::new();
    }
    let mut html = String::from("<section class=\"forecast\"><h2>5-Day Forecast</h2><div class=\"forecast-days\">");
    for day in days {
        html.push_str(&format!(
            concat!(
                "<article class=\"forecast-day\">",
                "<h3>{label}</h3>",
                "<img src=\"https://openweathermap.org/img/wn/{icon}.png\" alt=\"{desc}\">",
                "<p>{min:.1}&deg; / {max:.1}&deg;C</p>",
                "<p>{desc}</p>",
                "<ul class=\"details\">"
            ),
            label = escape(&day.label),
            icon = escape(&day.icon),
            desc = escape(&day.description),
            min = day.temp_min,
            max = day.temp_max,
        ));
        for detail in &day.details {
            html.push_str(&format!(
                "<li>{time} &mdash; {temp:.1}&deg;C, {desc}</li>",
                time = escape(&detail.time),
                temp = detail.temp,
                desc = escape(&detail.description),
            ));
        }
        html.push_str("</ul></article>");
    }
    html.push_str("</div></section>");
    html
}

/// Wall-clock time at the reported location, from the provider's UTC offset.
/// Falls back to UTC if the offset is out of range.
fn local_time(offset_seconds: i32) -> String {
    let offset = FixedOffset::east_opt(offset_seconds)
        .unwrap_or_else(|| FixedOffset::east_opt(0).expect("zero offset is valid"));
    Utc::now().with_timezone(&offset).format("%-I:%M %p").to_string()
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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

const STYLE: &str = "<style>\
body{font-family:system-ui,sans-serif;background:#eef3f8;margin:0}\
main{max-width:720px;margin:0 auto;padding:1.5rem}\
form{display:flex;gap:.5rem;position:relative;flex-wrap:wrap}\
input[type=text]{flex:1;padding:.5rem;font-size:1rem}\
#suggestions{position:absolute;top:2.6rem;left:0;right:0;background:#fff;\
list-style:none;margin:0;padding:0;border:1px solid #ccd;z-index:1}\
#suggestions li{padding:.4rem .6rem;cursor:pointer}\
#suggestions li:hover{background:#eef}\
.error{color:#b00020;font-weight:600}\
.weather-card,.forecast{background:#fff;border-radius:8px;padding:1rem;margin-top:1rem}\
.forecast-days{display:flex;gap:.75rem;overflow-x:auto}\
.forecast-day{min-width:9rem}\
.details{list-style:none;padding:0;font-size:.85rem;color:#445}\
</style>";

const SCRIPT: &str = r#"<script>
const cityInput = document.getElementById('city');
const list = document.getElementById('suggestions');
const form = document.getElementById('weather-form');
let timer = null;

cityInput.addEventListener('input', () => {
  clearTimeout(timer);
  const q = cityInput.value.trim();
  if (q.length < 2) { list.hidden = true; list.innerHTML = ''; return; }
  timer = setTimeout(async () => {
    const res = await fetch('/api/suggest-cities?q=' + encodeURIComponent(q));
    if (!res.ok) return;
    const items = await res.json();
    list.innerHTML = '';
    for (const item of items) {
      const li = document.createElement('li');
      li.textContent = [item.name, item.state, item.country].filter(Boolean).join(', ');
      li.addEventListener('click', () => {
        cityInput.value = item.name;
        list.hidden = true;
        form.submit();
      });
      list.appendChild(li);
    }
    list.hidden = items.length === 0;
  }, 250);
});

document.getElementById('locate').addEventListener('click', () => {
  navigator.geolocation.getCurrentPosition((pos) => {
    cityInput.value = '';
    document.getElementById('lat').value = pos.coords.latitude;
    document.getElementById('lon').value = pos.coords.longitude;
    form.submit();
  });
});
</script>"#;

#[cfg(test)]
mod tests {
    use super::*;
    use common::models::CurrentWeather;

    fn sample_report() -> WeatherReport {
        WeatherReport {
            current: CurrentWeather {
                city: "London".to_string(),
                temp: 18.2,
                description: "scattered clouds".to_string(),
                icon: "03d".to_string(),
                humidity: 62.0,
                wind_speed: 4.1,
                feels_like: 17.4,
                timezone_offset: 3600,
            },
            input_city: "London".to_string(),
            forecast: Vec::new(),
        }
    }

    #[test]
    fn success_page_contains_weather_card() {
        let report = sample_report();
        let html = page(&PageView {
            report: Some(&report),
            error: None,
            input_city: &report.input_city,
        });
        assert!(html.contains("weather-card"));
        assert!(html.contains("London"));
        assert!(html.contains("scattered clouds"));
    }

    #[test]
    fn error_page_has_message_and_no_weather_card() {
        let html = page(&PageView {
            report: None,
            error: Some("Location not found or invalid. Please check input."),
            input_city: "Atlantis",
        });
        assert!(html.contains("Location not found"));
        assert!(!html.contains("weather-card"));
        assert!(html.contains("Atlantis"));
    }

    #[test]
    fn user_input_is_escaped() {
        let html = page(&PageView {
            report: None,
            error: None,
            input_city: "<script>alert(1)</script>",
        });
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
