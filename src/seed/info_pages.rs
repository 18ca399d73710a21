use std::path::Path;

use crate::db::info_page_repository::InfoPageRepository;
use crate::db::models::{Audience, InfoPage};
use crate::error::AppError;

/// A fixed page. `file` names the text file in the content directory that
/// overrides `fallback` when present.
struct PageSpec {
    audience: Audience,
    slug: &'static str,
    title: &'static str,
    file: Option<&'static str>,
    fallback: &'static str,
}

const PAGES: &[PageSpec] = &[
    PageSpec {
        audience: Audience::User,
        slug: "terms",
        title: "Terms & Conditions",
        file: Some("TermsAndConditions.txt"),
        fallback: "By using NowStay, you agree to follow our booking, cancellation and usage rules. Bookings depend on availability, and each property may have its own check-in, ID and house rules that must be respected.",
    },
    PageSpec {
        audience: Audience::User,
        slug: "privacy",
        title: "Privacy Policy",
        file: Some("PrivacyPolicy.txt"),
        fallback: "We collect basic profile data and booking history to run the app, improve recommendations and communicate about your trips. Your data is stored securely and is not sold to third parties.",
    },
    PageSpec {
        audience: Audience::User,
        slug: "cancellation",
        title: "Cancellation & Refund",
        file: Some("CancellationPolicy.txt"),
        fallback: "Free cancellation up to 24 hours before check-in. Late cancellations are non-refundable. Refunds are processed within 5-7 business days.",
    },
    PageSpec {
        audience: Audience::User,
        slug: "about",
        title: "About NowStay",
        file: None,
        fallback: "NowStay is a mobile-first platform to discover, compare and book stays across hotels, PGs, homestays and villas. Our goal is to make city stays simple and transparent for young travellers and working professionals.",
    },
    PageSpec {
        audience: Audience::User,
        slug: "contact",
        title: "Contact Us",
        file: None,
        fallback: "For support related to bookings, payments or account access, you can write to Nowstayindia@gmail.com or call 9970907005.",
    },
    PageSpec {
        audience: Audience::Partner,
        slug: "terms",
        title: "Partner Agreement",
        file: None,
        fallback: "By listing your property on NowStay, you agree to keep availability, pricing and guest details accurate, honour confirmed bookings and follow our payout and commission rules.",
    },
    PageSpec {
        audience: Audience::Partner,
        slug: "privacy",
        title: "Partner Data Policy",
        file: None,
        fallback: "We store your property, booking and payout information to run reports, process payments and help you manage performance. Access to this data is restricted to authorised systems and team members.",
    },
    PageSpec {
        audience: Audience::Partner,
        slug: "about",
        title: "About NowStay Partner",
        file: None,
        fallback: "NowStay Partner is a dashboard for hotels, PGs and homestays to manage listings, track bookings and view payouts in a mobile-first way.",
    },
    PageSpec {
        audience: Audience::Partner,
        slug: "contact",
        title: "Contact NowStay Team",
        file: None,
        fallback: "For questions about onboarding, payouts or property performance, you can reach our partner support team at Nowstayindia@gmail.com.",
    },
];

/// Build the fixed page set, reading policy texts from `content_dir`.
///
/// A missing, unreadable or empty file falls back to the built-in text.
pub async fn build_info_pages(content_dir: &Path) -> Vec<InfoPage> {
    let mut pages = Vec::with_capacity(PAGES.len());

    for spec in PAGES {
        let from_file = match spec.file {
            Some(file) => read_content(content_dir, file).await,
            None => None,
        };

        pages.push(InfoPage {
            audience: spec.audience,
            slug: spec.slug.to_string(),
            title: spec.title.to_string(),
            content: from_file.unwrap_or_else(|| spec.fallback.to_string()),
        });
    }

    pages
}

async fn read_content(content_dir: &Path, file: &str) -> Option<String> {
    match tokio::fs::read_to_string(content_dir.join(file)).await {
        Ok(content) if !content.trim().is_empty() => Some(content),
        Ok(_) => {
            tracing::warn!("Content file {file} is empty, using default content.");
            None
        }
        Err(e) => {
            tracing::warn!("Could not read file {file}, using default content. Error: {e}");
            None
        }
    }
}

/// Upsert every fixed page by `(audience, slug)`. Returns the number of pages written.
pub async fn seed_info_pages(
    repo: &dyn InfoPageRepository,
    content_dir: &Path,
) -> Result<usize, AppError> {
    let pages = build_info_pages(content_dir).await;
    let count = pages.len();

    for page in pages {
        tracing::debug!("Upserting info page {}/{}", page.audience, page.slug);
        repo.upsert(page).await?;
    }

    tracing::info!("InfoPage seed completed successfully");
    Ok(count)
}
