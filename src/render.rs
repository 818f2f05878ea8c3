use crate::format::{self, FALLBACK_LOCATION};
use crate::models::Event;

pub const LOADING_HTML: &str = r#"<div class="loading">Loading events...</div>"#;
pub const FETCH_ERROR_HTML: &str =
    r#"<p class="error-message">Failed to load events. Please try again later.</p>"#;
pub const NO_EVENTS_HTML: &str =
    r#"<p class="no-events">No upcoming events at this time. Please check back later.</p>"#;

// One card per event, or the no-events placeholder. The whole grid is
// replaced on every render.
pub fn grid(events: &[Event], base_url: &str) -> String {
    if events.is_empty() {
        return NO_EVENTS_HTML.to_string();
    }
    events
        .iter()
        .map(|event| card(event, base_url))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn card(event: &Event, base_url: &str) -> String {
    let title = format::escape_html(&event.title);
    let description = format::escape_html(&event.description);
    let date = format::escape_html(&format::long_date(&event.date));
    let time = format::time_ampm(event.time_hint().as_deref());
    let location = format::escape_html(
        event
            .location
            .as_deref()
            .map(str::trim)
            .filter(|loc| !loc.is_empty())
            .unwrap_or(FALLBACK_LOCATION),
    );
    let image = format::escape_html(&format::image_url(base_url, event.image_url.as_deref()));

    format!(
        r#"<div class="event-card" data-event-id="{id}">
    <div class="event-image">
        <img src="{image}" alt="{title}">
    </div>
    <div class="event-content">
        <h3 class="event-title">{title}</h3>
        <div class="event-meta">
            <span class="event-date"><i class="far fa-calendar-alt"></i> {date}</span>
            <span class="event-time"><i class="far fa-clock"></i> {time}</span>
            <span class="event-location"><i class="fas fa-map-marker-alt"></i> {location}</span>
        </div>
        <p class="event-desc">{description}</p>
        <button class="btn btn-primary book-ticket">Book a Ticket</button>
    </div>
</div>"#,
        id = format::escape_html(&event.id),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn sample_events() -> Vec<Event> {
        vec![
            Event {
                id: "6650a1".into(),
                title: "Harvest Praise Night".into(),
                description: "An evening of worship.".into(),
                date: "2025-10-05T00:00:00.000Z".into(),
                time: Some("19:00".into()),
                location: Some("Main Auditorium".into()),
                image_url: Some(r"public\images\praise.jpg".into()),
            },
            Event {
                id: "6650a2".into(),
                title: "Youth Conference".into(),
                description: String::new(),
                date: "2025-11-12T18:30:00.000Z".into(),
                time: None,
                location: None,
                image_url: None,
            },
        ]
    }

    fn selector(css: &str) -> Selector {
        Selector::parse(css).expect("valid selector")
    }

    #[test]
    fn renders_one_card_per_event() {
        let html = grid(&sample_events(), "http://localhost:5000");
        let document = Html::parse_fragment(&html);

        let ids: Vec<_> = document
            .select(&selector(".event-card"))
            .map(|card| card.value().attr("data-event-id").expect("card id").to_string())
            .collect();
        assert_eq!(ids, vec!["6650a1", "6650a2"]);

        let buttons = document.select(&selector("button.book-ticket")).count();
        assert_eq!(buttons, 2, "every card carries a booking button");
    }

    #[test]
    fn card_meta_uses_formatted_values() {
        let html = card(&sample_events()[0], "http://localhost:5000");
        let document = Html::parse_fragment(&html);

        let date = document
            .select(&selector(".event-date"))
            .next()
            .expect("date span");
        assert!(date.text().collect::<String>().contains("October 5, 2025"));

        let time = document
            .select(&selector(".event-time"))
            .next()
            .expect("time span");
        assert!(time.text().collect::<String>().contains("7:00 PM"));

        let img = document.select(&selector("img")).next().expect("image");
        assert_eq!(
            img.value().attr("src"),
            Some("http://localhost:5000/images/praise.jpg")
        );
    }

    #[test]
    fn card_substitutes_placeholders() {
        let html = card(&sample_events()[1], "http://localhost:5000");
        let document = Html::parse_fragment(&html);

        let location = document
            .select(&selector(".event-location"))
            .next()
            .expect("location span");
        assert!(location
            .text()
            .collect::<String>()
            .contains(crate::format::FALLBACK_LOCATION));

        let img = document.select(&selector("img")).next().expect("image");
        assert_eq!(img.value().attr("src"), Some(crate::format::PLACEHOLDER_IMAGE));

        // embedded 18:30 from the date, since no explicit time was sent
        let time = document
            .select(&selector(".event-time"))
            .next()
            .expect("time span");
        assert!(time.text().collect::<String>().contains("6:30 PM"));
    }

    #[test]
    fn empty_list_renders_only_the_placeholder() {
        let html = grid(&[], "http://localhost:5000");
        let document = Html::parse_fragment(&html);

        assert_eq!(document.select(&selector(".no-events")).count(), 1);
        assert_eq!(document.select(&selector(".event-card")).count(), 0);
    }

    #[test]
    fn backend_text_is_escaped() {
        let mut event = sample_events()[0].clone();
        event.title = "<script>alert('x')</script>".into();
        let html = card(&event, "http://localhost:5000");
        let document = Html::parse_fragment(&html);

        assert_eq!(document.select(&selector("script")).count(), 0);
        let title = document
            .select(&selector(".event-title"))
            .next()
            .expect("title");
        assert!(title.text().collect::<String>().contains("alert('x')"));
    }
}
