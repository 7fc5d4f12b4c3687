//! Rating-to-visual mappings.
//!
//! Each mapping is its own step function of the integer rating; the bucket
//! edges do not line up across them.

use ratatui::style::Color;

/// Page background bucket. Ratings outside 0..=10 land in `Maximum`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageBucket {
    None,
    Mild,
    Moderate,
    Elevated,
    Extreme,
    Maximum,
}

impl PageBucket {
    pub fn for_rating(rating: i64) -> Self {
        match rating {
            0 => PageBucket::None,
            1..=3 => PageBucket::Mild,
            4..=5 => PageBucket::Moderate,
            6..=7 => PageBucket::Elevated,
            8..=9 => PageBucket::Extreme,
            _ => PageBucket::Maximum,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PageBucket::None => "none",
            PageBucket::Mild => "mild",
            PageBucket::Moderate => "moderate",
            PageBucket::Elevated => "elevated",
            PageBucket::Extreme => "extreme",
            PageBucket::Maximum => "maximum",
        }
    }

    pub fn rgb(self) -> [u8; 3] {
        match self {
            PageBucket::None => [0xff, 0xff, 0xff],
            PageBucket::Mild => [0xbb, 0xf7, 0xd0],
            PageBucket::Moderate => [0xfe, 0xf0, 0x8a],
            PageBucket::Elevated => [0xfe, 0xd7, 0xaa],
            PageBucket::Extreme => [0xfe, 0xca, 0xca],
            PageBucket::Maximum => [0xfc, 0xa5, 0xa5],
        }
    }
}

/// Event card fill/border bucket. Zero shares the calm bucket here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardBucket {
    Calm,
    Uneasy,
    Alarming,
    Unhinged,
    Beyond,
}

impl CardBucket {
    pub fn for_rating(rating: i64) -> Self {
        if rating <= 3 {
            CardBucket::Calm
        } else if rating <= 5 {
            CardBucket::Uneasy
        } else if rating <= 7 {
            CardBucket::Alarming
        } else if rating <= 9 {
            CardBucket::Unhinged
        } else {
            CardBucket::Beyond
        }
    }

    pub fn fill_rgb(self) -> [u8; 3] {
        match self {
            CardBucket::Calm => [0xbb, 0xf7, 0xd0],
            CardBucket::Uneasy => [0xfe, 0xf0, 0x8a],
            CardBucket::Alarming => [0xfe, 0xd7, 0xaa],
            CardBucket::Unhinged => [0xfe, 0xca, 0xca],
            CardBucket::Beyond => [0xfc, 0xa5, 0xa5],
        }
    }

    pub fn border_rgb(self) -> [u8; 3] {
        match self {
            CardBucket::Calm => [0x4a, 0xde, 0x80],
            CardBucket::Uneasy => [0xfa, 0xcc, 0x15],
            CardBucket::Alarming => [0xfb, 0x92, 0x3c],
            CardBucket::Unhinged => [0xf8, 0x71, 0x71],
            CardBucket::Beyond => [0xef, 0x44, 0x44],
        }
    }
}

/// Colored "n/10" badge next to each card title
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Green,
    Yellow,
    Red,
}

impl Badge {
    pub fn for_rating(rating: i64) -> Self {
        if rating > 6 {
            Badge::Red
        } else if rating > 3 {
            Badge::Yellow
        } else {
            Badge::Green
        }
    }

    pub fn rgb(self) -> [u8; 3] {
        match self {
            Badge::Green => [0x22, 0xc5, 0x5e],
            Badge::Yellow => [0xea, 0xb3, 0x08],
            Badge::Red => [0xef, 0x44, 0x44],
        }
    }
}

pub fn emoji(rating: i64) -> &'static str {
    if rating == 0 {
        "🫨"
    } else if rating <= 3 {
        "😌"
    } else if rating <= 6 {
        "😅"
    } else if rating <= 8 {
        "😱"
    } else {
        "🤯"
    }
}

pub fn color([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_buckets_named_by_rating() {
        assert_eq!(PageBucket::for_rating(0).name(), "none");
        assert_eq!(PageBucket::for_rating(4).name(), "moderate");
        assert_eq!(PageBucket::for_rating(9).name(), "extreme");
        assert_ne!(PageBucket::for_rating(4), PageBucket::for_rating(9));
    }

    #[test]
    fn page_bucket_edges() {
        assert_eq!(PageBucket::for_rating(3), PageBucket::Mild);
        assert_eq!(PageBucket::for_rating(4), PageBucket::Moderate);
        assert_eq!(PageBucket::for_rating(5), PageBucket::Moderate);
        assert_eq!(PageBucket::for_rating(6), PageBucket::Elevated);
        assert_eq!(PageBucket::for_rating(7), PageBucket::Elevated);
        assert_eq!(PageBucket::for_rating(8), PageBucket::Extreme);
        assert_eq!(PageBucket::for_rating(9), PageBucket::Extreme);
        assert_eq!(PageBucket::for_rating(10), PageBucket::Maximum);
        assert_eq!(PageBucket::for_rating(42), PageBucket::Maximum);
        assert_eq!(PageBucket::for_rating(-1), PageBucket::Maximum);
    }

    #[test]
    fn page_colors() {
        assert_eq!(PageBucket::None.rgb(), [0xff, 0xff, 0xff]);
        assert_eq!(PageBucket::Mild.rgb(), [0xbb, 0xf7, 0xd0]);
        assert_eq!(PageBucket::Maximum.rgb(), [0xfc, 0xa5, 0xa5]);
    }

    #[test]
    fn card_bucket_edges() {
        assert_eq!(CardBucket::for_rating(0), CardBucket::Calm);
        assert_eq!(CardBucket::for_rating(3), CardBucket::Calm);
        assert_eq!(CardBucket::for_rating(4), CardBucket::Uneasy);
        assert_eq!(CardBucket::for_rating(7), CardBucket::Alarming);
        assert_eq!(CardBucket::for_rating(8), CardBucket::Unhinged);
        assert_eq!(CardBucket::for_rating(9), CardBucket::Unhinged);
        assert_eq!(CardBucket::for_rating(10), CardBucket::Beyond);
        assert_eq!(CardBucket::for_rating(-5), CardBucket::Calm);
    }

    #[test]
    fn emoji_edges() {
        assert_eq!(emoji(0), "🫨");
        assert_eq!(emoji(3), "😌");
        assert_eq!(emoji(4), "😅");
        assert_eq!(emoji(6), "😅");
        assert_eq!(emoji(7), "😱");
        assert_eq!(emoji(8), "😱");
        assert_eq!(emoji(9), "🤯");
        assert_eq!(emoji(10), "🤯");
    }

    #[test]
    fn badge_edges() {
        assert_eq!(Badge::for_rating(3), Badge::Green);
        assert_eq!(Badge::for_rating(4), Badge::Yellow);
        assert_eq!(Badge::for_rating(6), Badge::Yellow);
        assert_eq!(Badge::for_rating(7), Badge::Red);
    }
}
