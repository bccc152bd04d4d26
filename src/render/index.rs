//! Blog index: post cards and the schema.org `Blog` document.

use crate::{config::SiteInfo, post::Post, utils::date::human};
use serde_json::{Value, json};

/// Published posts, newest `publish_at` first. Ties keep store order.
pub fn newest_first<'a>(posts: &[&'a Post]) -> Vec<&'a Post> {
    let mut sorted = posts.to_vec();
    sorted.sort_by(|a, b| b.publish_at.cmp(&a.publish_at));
    sorted
}

/// Fill `{{BLOG_JSONLD}}` and `{{BLOG_CARDS}}` in the index template.
///
/// `index_path` is the index page's path relative to the site root.
pub fn render_index(template: &str, posts: &[&Post], site: &SiteInfo, index_path: &str) -> String {
    let posts = newest_first(posts);
    template
        .replace("{{BLOG_JSONLD}}", &blog_jsonld(&posts, site, index_path))
        .replace("{{BLOG_CARDS}}", &blog_cards(&posts, site))
}

fn blog_cards(posts: &[&Post], site: &SiteInfo) -> String {
    posts
        .iter()
        .map(|post| card(post, site))
        .collect::<Vec<_>>()
        .join("\n")
}

fn card(post: &Post, site: &SiteInfo) -> String {
    let date = post.display_date().map(human).unwrap_or_default();
    let title = post.title();
    let description = post.description().unwrap_or_default();
    let author = post.author(&site.default_author);
    let url = post.page_path();

    format!(
        r#"<article class="blog-card" style="background-color: white; padding: 2rem; border-radius: 1rem; box-shadow: 0 1px 3px 0 rgba(0, 0, 0, 0.1); border: 1px solid #e5e7eb; transition: box-shadow 0.2s ease;">
  <div style="display: flex; align-items: center; margin-bottom: 1rem;">
    <svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" style="color: #8b5cf6; margin-right: 0.5rem;">
      <rect x="3" y="4" width="18" height="18" rx="2" ry="2"></rect>
      <line x1="16" y1="2" x2="16" y2="6"></line>
      <line x1="8" y1="2" x2="8" y2="6"></line>
      <line x1="3" y1="10" x2="21" y2="10"></line>
    </svg>
    <time style="color: #8b5cf6; font-weight: 500; font-size: 0.875rem;">{date}</time>
  </div>
  <h2 style="font-size: 1.25rem; font-weight: 500; color: #111827; margin-bottom: 1rem; line-height: 1.4;">{title}</h2>
  <p style="color: #6b7280; font-weight: 300; line-height: 1.6; margin-bottom: 0.75rem;">{description}</p>
  <div style="display: flex; align-items: center; justify-content: space-between;">
    <span style="font-size: 0.875rem; color: #6b7280; font-weight: 300;">By {author}</span>
    <a href="{url}" class="btn btn-outline" style="padding: 0.5rem 1rem; font-size: 0.875rem;">Read more
      <svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" style="margin-left: 0.5rem;">
        <line x1="5" y1="12" x2="19" y2="12"></line>
        <polyline points="12,5 19,12 12,19"></polyline>
      </svg>
    </a>
  </div>
</article>"#
    )
}

fn blog_jsonld(posts: &[&Post], site: &SiteInfo, index_path: &str) -> String {
    let blog_posts: Vec<Value> = posts
        .iter()
        .map(|post| {
            json!({
                "@type": "BlogPosting",
                "headline": post.title,
                "datePublished": post.display_date(),
                "author": {
                    "@type": "Person",
                    "name": post.author(&site.default_author),
                },
                "url": site.absolute_url(&post.page_path()),
            })
        })
        .collect();

    let blog = json!({
        "@context": "https://schema.org",
        "@type": "Blog",
        "name": format!("{} Blog", site.name),
        "description": site.description,
        "url": site.absolute_url(index_path),
        "publisher": {
            "@type": "Organization",
            "name": site.name,
            "logo": {
                "@type": "ImageObject",
                "url": site.absolute_url(&site.logo),
            },
        },
        "blogPost": blog_posts,
    });

    // A json! value has string keys only.
    serde_json::to_string_pretty(&blog).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> SiteInfo {
        SiteInfo {
            name: "Acme".into(),
            url: "https://acme.dev".into(),
            description: "Notes".into(),
            default_author: "Acme Team".into(),
            logo: "images/logo.png".into(),
        }
    }

    fn posts(json: &str) -> Vec<Post> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_newest_first_is_stable() {
        let all = posts(
            r#"[{"slug": "old", "publish_at": "2023-01-01"},
                {"slug": "tie1", "publish_at": "2024-01-01"},
                {"slug": "none"},
                {"slug": "tie2", "publish_at": "2024-01-01"},
                {"slug": "new", "publish_at": "2024-06-01"}]"#,
        );
        let refs: Vec<&Post> = all.iter().collect();

        let slugs: Vec<&str> = newest_first(&refs).iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["new", "tie1", "tie2", "old", "none"]);
    }

    #[test]
    fn test_cards() {
        let all = posts(
            r#"[{"slug": "a", "title": "Alpha", "description": "First", "publish_at": "2024-01-02"},
                {"slug": "b", "title": "Beta", "author": "Bo", "publish_at": "2024-02-03",
                 "published_at": "2024-02-04"}]"#,
        );
        let refs: Vec<&Post> = all.iter().collect();
        let html = render_index("<main>{{BLOG_CARDS}}</main>", &refs, &site(), "blog.html");

        let beta = html.find(">Beta</h2>").unwrap();
        let alpha = html.find(">Alpha</h2>").unwrap();
        assert!(beta < alpha);
        assert!(html.contains(">February 04, 2024</time>"));
        assert!(html.contains(">January 02, 2024</time>"));
        assert!(html.contains(">By Bo</span>"));
        assert!(html.contains(">By Acme Team</span>"));
        assert!(html.contains(r#"<a href="b.html" class="btn btn-outline""#));
        assert!(html.contains(">First</p>"));
        assert_eq!(html.matches("<article class=\"blog-card\"").count(), 2);
    }

    #[test]
    fn test_jsonld() {
        let all = posts(
            r#"[{"slug": "a", "title": "Ünïcode", "publish_at": "2024-01-02"},
                {"slug": "b", "source_type": "full_html", "source_path": "guides/b.html",
                 "publish_at": "2024-03-01", "published_at": "2024-03-01"}]"#,
        );
        let refs: Vec<&Post> = all.iter().collect();
        let out = render_index("{{BLOG_JSONLD}}", &refs, &site(), "blog.html");
        let doc: Value = serde_json::from_str(&out).unwrap();

        assert_eq!(doc["@type"], "Blog");
        assert_eq!(doc["name"], "Acme Blog");
        assert_eq!(doc["url"], "https://acme.dev/blog.html");
        assert_eq!(doc["publisher"]["logo"]["url"], "https://acme.dev/images/logo.png");

        let entries = doc["blogPost"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["url"], "https://acme.dev/guides/b.html");
        assert_eq!(entries[0]["headline"], Value::Null);
        assert_eq!(entries[1]["headline"], "Ünïcode");
        assert_eq!(entries[1]["author"]["name"], "Acme Team");
        assert_eq!(entries[1]["datePublished"], "2024-01-02");

        // Two-space indentation and literal non-ASCII.
        assert!(out.starts_with("{\n  \"@context\""));
        assert!(out.contains("Ünïcode"));
    }

    #[test]
    fn test_empty_index() {
        let html = render_index("[{{BLOG_CARDS}}]", &[], &site(), "blog.html");
        assert_eq!(html, "[]");
    }
}
