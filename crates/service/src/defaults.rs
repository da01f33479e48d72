//! Built-in content: seeded into an empty store and served when the store fails.

use models::{BlogPost, Plan};

/// Page size of the blog listing.
pub const BLOG_LIMIT: u64 = 20;

pub fn default_plans() -> Vec<Plan> {
    vec![
        Plan::new(
            "Essential",
            39.0,
            "Everyday shaping for a smooth silhouette.",
            &["Breathable fabric", "Light-to-medium compression", "Seamless under outfits"],
        ),
        Plan::new(
            "Sculpt",
            69.0,
            "Targeted compression for confident curves.",
            &["Tummy & waist shaping", "Butt-lift design", "Anti-slip straps", "All-day comfort"],
        )
        .best_value(),
        Plan::new(
            "Ultra",
            99.0,
            "Maximum control for special occasions.",
            &["Firm compression", "Hourglass support zones", "Moisture-wicking", "Invisible edges"],
        ),
    ]
}

pub fn sample_posts() -> Vec<BlogPost> {
    vec![
        BlogPost {
            title: "How to choose the right shapewear bodysuit".into(),
            excerpt: Some("A quick guide to fit, compression, and comfort.".into()),
            content: "Choosing your perfect fit comes down to ...".into(),
            author: "Team Lumina".into(),
            cover_image: None,
            tags: vec!["fit".into(), "guide".into()],
        },
        BlogPost {
            title: "Confidence starts underneath".into(),
            excerpt: Some("Why great foundations change everything.".into()),
            content: "Confidence is built from the base up ...".into(),
            author: "Editor".into(),
            cover_image: None,
            tags: vec!["confidence".into()],
        },
    ]
}
