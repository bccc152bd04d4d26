//! Publication gate: which posts go live today.
//!
//! A post is published when it is approved, not yet published, and its
//! `publish_at` day has arrived. Publication is one-way.

use super::Post;
use crate::{log, utils::date::parse_ymd};

/// Outcome of checking one post against the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Flipped to published by this call.
    Published,
    /// Already published earlier.
    AlreadyPublished,
    /// Not approved, no date, or date still in the future.
    NotDue,
    /// `publish_at` is not a `YYYY-MM-DD` date.
    Malformed,
}

/// Apply the gate to one post, with `today` as `YYYY-MM-DD`.
///
/// Only `published` and `published_at` are ever touched.
pub fn check(post: &mut Post, today: &str) -> Gate {
    if post.published {
        return Gate::AlreadyPublished;
    }
    if !post.approved {
        return Gate::NotDue;
    }
    let Some(publish_at) = post.publish_at.as_deref() else {
        return Gate::NotDue;
    };
    if parse_ymd(publish_at).is_none() {
        return Gate::Malformed;
    }
    // Fixed-width ISO dates: lexical order is calendar order.
    if publish_at > today {
        return Gate::NotDue;
    }

    post.published = true;
    post.published_at = Some(publish_at.to_owned());
    Gate::Published
}

/// Apply the gate to every post; returns the slugs published by this call.
pub fn publish_due(posts: &mut [Post], today: &str) -> Vec<String> {
    let mut published = Vec::new();
    for post in posts.iter_mut() {
        match check(post, today) {
            Gate::Published => {
                log!("publish"; "{} is due ({})", post.slug, today);
                published.push(post.slug.clone());
            }
            Gate::Malformed => {
                log!(
                    "warn";
                    "{}: publish_at `{}` is not YYYY-MM-DD, leaving unpublished",
                    post.slug,
                    post.publish_at.as_deref().unwrap_or_default()
                );
            }
            Gate::AlreadyPublished | Gate::NotDue => {}
        }
    }
    published
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(approved: bool, publish_at: Option<&str>) -> Post {
        Post {
            slug: "a".into(),
            approved,
            publish_at: publish_at.map(str::to_owned),
            ..Post::default()
        }
    }

    #[test]
    fn test_due_post_is_published() {
        let mut p = post(true, Some("2023-01-01"));

        assert_eq!(check(&mut p, "2023-06-01"), Gate::Published);
        assert!(p.published);
        assert_eq!(p.published_at.as_deref(), Some("2023-01-01"));
    }

    #[test]
    fn test_publish_on_the_day() {
        let mut p = post(true, Some("2023-06-01"));
        assert_eq!(check(&mut p, "2023-06-01"), Gate::Published);
    }

    #[test]
    fn test_future_post_waits() {
        let mut p = post(true, Some("2023-06-02"));

        assert_eq!(check(&mut p, "2023-06-01"), Gate::NotDue);
        assert!(!p.published);
        assert_eq!(p.published_at, None);
    }

    #[test]
    fn test_unapproved_never_publishes() {
        for date in ["1999-01-01", "2023-06-01", "2099-12-31"] {
            let mut p = post(false, Some(date));
            assert_eq!(check(&mut p, "2023-06-01"), Gate::NotDue);
            assert!(!p.published);
        }
    }

    #[test]
    fn test_missing_date_waits() {
        let mut p = post(true, None);
        assert_eq!(check(&mut p, "2023-06-01"), Gate::NotDue);
    }

    #[test]
    fn test_malformed_date_is_swallowed() {
        let mut p = post(true, Some("next tuesday"));
        assert_eq!(check(&mut p, "2023-06-01"), Gate::Malformed);
        assert!(!p.published);

        // Lexically "2023-1-5" < "2023-06-01" but it is not a valid date.
        let mut p = post(true, Some("2023-1-5"));
        assert_eq!(check(&mut p, "2023-06-01"), Gate::Malformed);
        assert!(!p.published);
    }

    #[test]
    fn test_published_only_once() {
        let mut posts = vec![post(true, Some("2023-01-01"))];

        assert_eq!(publish_due(&mut posts, "2023-06-01"), vec!["a".to_owned()]);
        assert!(publish_due(&mut posts, "2023-06-01").is_empty());
        assert!(publish_due(&mut posts, "2024-01-01").is_empty());
        assert_eq!(posts[0].published_at.as_deref(), Some("2023-01-01"));
    }

    #[test]
    fn test_published_never_reverts() {
        let mut p = Post {
            slug: "a".into(),
            approved: false,
            published: true,
            published_at: Some("2020-01-01".into()),
            publish_at: Some("2030-01-01".into()),
            ..Post::default()
        };

        assert_eq!(check(&mut p, "2023-06-01"), Gate::AlreadyPublished);
        assert!(p.published);
        assert_eq!(p.published_at.as_deref(), Some("2020-01-01"));
    }

    #[test]
    fn test_publish_due_only_touches_gate_fields() {
        let mut posts = vec![Post {
            title: Some("Title".into()),
            description: Some("Desc".into()),
            ..post(true, Some("2023-01-01"))
        }];
        let before = posts[0].clone();
        publish_due(&mut posts, "2023-06-01");

        let after = &posts[0];
        assert_eq!(after.title, before.title);
        assert_eq!(after.description, before.description);
        assert_eq!(after.publish_at, before.publish_at);
        assert_eq!(after.approved, before.approved);
    }
}
