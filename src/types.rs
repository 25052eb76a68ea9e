use std::fmt;

use serde::{Deserialize, Serialize};

/// One gallery record as served by `/api/gallery/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Reference to one displayable image: a bare location from the page seed,
/// or a structured record from the remote gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageDescriptor {
    Bare(String),
    Record(GalleryImage),
}

impl ImageDescriptor {
    pub fn location(&self) -> &str {
        match self {
            ImageDescriptor::Bare(s) => s,
            ImageDescriptor::Record(r) => &r.image,
        }
    }
}

impl From<&str> for ImageDescriptor {
    fn from(s: &str) -> Self { ImageDescriptor::Bare(s.to_string()) }
}

impl From<GalleryImage> for ImageDescriptor {
    fn from(r: GalleryImage) -> Self { ImageDescriptor::Record(r) }
}

/// Raw form input, exactly as typed.
#[derive(Debug, Clone, Default)]
pub struct BookingForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub event_type: String,
    pub date: String,
    pub location: String,
    pub amount: String,
    pub message: String,
}

/// Body of `POST /api/booking/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub event_type: String,
    pub date: String,
    pub location: String,
    pub amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<&BookingForm> for BookingRequest {
    // date goes through untouched; everything else is trimmed
    fn from(f: &BookingForm) -> Self {
        let message = f.message.trim();
        Self {
            name: f.name.trim().to_string(),
            phone: f.phone.trim().to_string(),
            email: f.email.trim().to_string(),
            event_type: f.event_type.trim().to_string(),
            date: f.date.clone(),
            location: f.location.trim().to_string(),
            amount: f.amount.trim().to_string(),
            message: Some(message.to_string()).filter(|m| !m.is_empty()),
        }
    }
}

/// Booking identifier; the backend may send it as a string or a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BookingId {
    Number(i64),
    Text(String),
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingId::Number(n) => write!(f, "{}", n),
            BookingId::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<BookingId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_trims_everything_but_date() {
        let form = BookingForm {
            name: "  Alice  ".into(),
            phone: " 98765 ".into(),
            email: "a@example.com\n".into(),
            event_type: "\tWedding".into(),
            date: " 2026-12-01 ".into(),
            location: " Pune ".into(),
            amount: " 50000".into(),
            message: "   ".into(),
        };
        let req = BookingRequest::from(&form);
        assert_eq!(req.name, "Alice");
        assert_eq!(req.phone, "98765");
        assert_eq!(req.email, "a@example.com");
        assert_eq!(req.event_type, "Wedding");
        assert_eq!(req.date, " 2026-12-01 ");
        assert_eq!(req.location, "Pune");
        assert_eq!(req.amount, "50000");
        assert_eq!(req.message, None);
    }

    #[test]
    fn request_body_omits_empty_message() {
        let req = BookingRequest::from(&BookingForm { name: "Bob".into(), ..Default::default() });
        let v = serde_json::to_value(&req).unwrap();
        let obj = v.as_object().unwrap();
        assert!(!obj.contains_key("message"));
        for key in ["name", "phone", "email", "event_type", "date", "location", "amount"] {
            assert!(obj[key].is_string(), "{key} should be a string");
        }
    }

    #[test]
    fn gallery_records_parse_as_structured_descriptors() {
        let list: Vec<ImageDescriptor> =
            serde_json::from_str(r#"[{"image":"a.jpg"},{"image":"b.jpg","title":"Stage","extra":1}]"#).unwrap();
        assert_eq!(list[0].location(), "a.jpg");
        assert_eq!(list[1], ImageDescriptor::Record(GalleryImage { image: "b.jpg".into(), title: Some("Stage".into()) }));
        assert_eq!(ImageDescriptor::from("c.jpg").location(), "c.jpg");
    }

    #[test]
    fn booking_id_accepts_text_or_number() {
        let r: BookingResult = serde_json::from_str(r#"{"success":true,"booking_id":"B123"}"#).unwrap();
        assert_eq!(r.booking_id.unwrap().to_string(), "B123");
        let r: BookingResult = serde_json::from_str(r#"{"success":true,"booking_id":42}"#).unwrap();
        assert_eq!(r.booking_id, Some(BookingId::Number(42)));
        let r: BookingResult = serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert!(!r.success && r.booking_id.is_none());
    }
}
