//! Filtering, ordering and pagination over in-memory collections.
//!
//! Everything here is pure and total: any filter value is accepted, values
//! that match nothing simply yield an empty result.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::db::models::{NewsFilter, NewsItem, Pagination, PmResource, PmResourceFilter};

impl NewsFilter {
    /// Whether `item` passes every filter set on `self`.
    pub fn matches(&self, item: &NewsItem) -> bool {
        any_of(&self.company, |c| contains_ci(&item.company, c))
            && any_of(&self.implementation_type, |t| item.implementation_type == *t)
            && any_shared(&self.relevance_categories, &item.relevance_categories)
            && any_of(&self.industry, |i| contains_ci(&item.industry, i))
            && self
                .is_breakthrough
                .map_or(true, |wanted| item.is_breakthrough == wanted)
    }
}

impl PmResourceFilter {
    pub fn matches(&self, resource: &PmResource) -> bool {
        any_of(&self.resource_type, |t| resource.resource_type == *t)
            && any_of(&self.pm_stage, |s| resource.pm_stage == *s)
            && any_of(&self.company, |c| {
                resource
                    .company
                    .as_deref()
                    .is_some_and(|own| contains_ci(own, c))
            })
            && any_of(&self.difficulty, |d| resource.difficulty == *d)
            && any_shared(&self.tags, &resource.tags)
    }
}

/// Newest `published_at` first; equal dates put the higher gravity score first.
pub fn news_order(a: &NewsItem, b: &NewsItem) -> Ordering {
    b.published_at
        .cmp(&a.published_at)
        .then_with(|| b.gravity_score.cmp(&a.gravity_score))
}

/// Newest `created_at` first.
pub fn pm_resource_order(a: &PmResource, b: &PmResource) -> Ordering {
    b.created_at.cmp(&a.created_at)
}

/// Filter, sort (stable) and paginate news items.
pub fn select_news<'a, I>(items: I, filter: &NewsFilter) -> Vec<NewsItem>
where
    I: IntoIterator<Item = &'a NewsItem>,
{
    let mut selected: Vec<NewsItem> = items
        .into_iter()
        .filter(|item| filter.matches(item))
        .cloned()
        .collect();
    selected.sort_by(news_order);
    paginate(selected, filter.page)
}

/// Filter, sort (stable) and paginate PM resources.
pub fn select_pm_resources<'a, I>(resources: I, filter: &PmResourceFilter) -> Vec<PmResource>
where
    I: IntoIterator<Item = &'a PmResource>,
{
    let mut selected: Vec<PmResource> = resources
        .into_iter()
        .filter(|resource| filter.matches(resource))
        .cloned()
        .collect();
    selected.sort_by(pm_resource_order);
    paginate(selected, filter.page)
}

/// Keep the `[offset, offset + limit)` window. An offset past the end yields nothing.
pub fn paginate<T>(items: Vec<T>, page: Pagination) -> Vec<T> {
    let limit = page.limit.unwrap_or(usize::MAX);
    items.into_iter().skip(page.offset).take(limit).collect()
}

/// Deduplicate, keeping the first occurrence of each value.
pub fn distinct<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for value in values {
        let value = value.as_ref();
        if seen.insert(value.to_string()) {
            out.push(value.to_string());
        }
    }
    out
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// True when nothing is wanted or at least one wanted value passes `accept`.
fn any_of(wanted: &[String], accept: impl Fn(&str) -> bool) -> bool {
    wanted.is_empty() || wanted.iter().any(|w| accept(w.as_str()))
}

/// True when `wanted` is empty or shares at least one value with `present`.
fn any_shared(wanted: &[String], present: &[String]) -> bool {
    any_of(wanted, |w| present.iter().any(|p| p == w))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};
    use uuid::Uuid;

    fn news(
        company: &str,
        implementation_type: &str,
        categories: &[&str],
        industry: &str,
        gravity: i32,
        breakthrough: bool,
        published_at: DateTime<Utc>,
    ) -> NewsItem {
        NewsItem {
            id: Uuid::new_v4(),
            title: format!("{company} news"),
            description: "desc".to_string(),
            content: None,
            image_url: None,
            source_url: None,
            company: company.to_string(),
            implementation_type: implementation_type.to_string(),
            relevance_categories: categories.iter().map(|c| c.to_string()).collect(),
            industry: industry.to_string(),
            technology: "LLM".to_string(),
            gravity_score: gravity,
            is_breakthrough: breakthrough,
            published_at,
            created_at: published_at,
        }
    }

    fn resource(
        resource_type: &str,
        pm_stage: &str,
        company: Option<&str>,
        tags: &[&str],
        difficulty: &str,
        created_at: DateTime<Utc>,
    ) -> PmResource {
        PmResource {
            id: Uuid::new_v4(),
            title: format!("{resource_type} for {pm_stage}"),
            description: "desc".to_string(),
            content: None,
            resource_type: resource_type.to_string(),
            pm_stage: pm_stage.to_string(),
            company: company.map(str::to_string),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            difficulty: difficulty.to_string(),
            resource_url: None,
            download_url: None,
            created_at,
        }
    }

    fn corpus() -> Vec<NewsItem> {
        let now = Utc::now();
        vec![
            news("OpenAI", "Released", &["Coding", "Education"], "Technology", 95, true, now - Duration::hours(2)),
            news("Google", "Research", &["Research", "Education"], "Technology", 88, true, now - Duration::hours(4)),
            news("DeepMind", "Research", &["Healthcare", "Research"], "Biotechnology", 85, false, now - Duration::days(2)),
            news("GitHub", "Released", &["Coding", "DevTools"], "Technology", 72, false, now - Duration::days(4)),
        ]
    }

    #[test]
    fn test_company_filter_is_case_insensitive_substring() {
        let items = corpus();
        let filter = NewsFilter {
            company: vec!["deep".to_string()],
            ..Default::default()
        };
        let selected = select_news(&items, &filter);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].company, "DeepMind");
    }

    #[test]
    fn test_implementation_type_is_exact() {
        let items = corpus();
        let filter = NewsFilter {
            implementation_type: vec!["research".to_string()],
            ..Default::default()
        };
        assert!(select_news(&items, &filter).is_empty());

        let filter = NewsFilter {
            implementation_type: vec!["Research".to_string()],
            ..Default::default()
        };
        assert_eq!(select_news(&items, &filter).len(), 2);
    }

    #[test]
    fn test_categories_match_any_within_field_and_all_across_fields() {
        let items = corpus();

        let any = NewsFilter {
            relevance_categories: vec!["Healthcare".to_string(), "DevTools".to_string()],
            ..Default::default()
        };
        let companies: Vec<String> = select_news(&items, &any)
            .into_iter()
            .map(|i| i.company)
            .collect();
        assert_eq!(companies, vec!["DeepMind", "GitHub"]);

        let combined = NewsFilter {
            relevance_categories: vec!["Coding".to_string(), "Research".to_string()],
            is_breakthrough: Some(true),
            industry: vec!["tech".to_string()],
            ..Default::default()
        };
        let companies: Vec<String> = select_news(&items, &combined)
            .into_iter()
            .map(|i| i.company)
            .collect();
        assert_eq!(companies, vec!["OpenAI", "Google"]);
    }

    #[test]
    fn test_repeated_scalar_values_match_any() {
        let items = corpus();

        let companies = NewsFilter {
            company: vec!["openai".to_string(), "Google".to_string()],
            ..Default::default()
        };
        let selected: Vec<String> = select_news(&items, &companies)
            .into_iter()
            .map(|i| i.company)
            .collect();
        assert_eq!(selected, vec!["OpenAI", "Google"]);

        let industries = NewsFilter {
            industry: vec!["Biotechnology".to_string(), "Technology".to_string()],
            ..Default::default()
        };
        assert_eq!(select_news(&items, &industries).len(), 4);

        // Still AND across fields.
        let narrowed = NewsFilter {
            company: vec!["OpenAI".to_string(), "DeepMind".to_string()],
            implementation_type: vec!["Research".to_string(), "Beta".to_string()],
            ..Default::default()
        };
        let selected: Vec<String> = select_news(&items, &narrowed)
            .into_iter()
            .map(|i| i.company)
            .collect();
        assert_eq!(selected, vec!["DeepMind"]);
    }

    #[test]
    fn test_breakthrough_false_is_a_real_filter() {
        let items = corpus();
        let filter = NewsFilter {
            is_breakthrough: Some(false),
            ..Default::default()
        };
        let selected = select_news(&items, &filter);
        assert_eq!(selected.len(), 2);
        assert!(selected.iter().all(|i| !i.is_breakthrough));
    }

    #[test]
    fn test_unmatched_values_yield_empty() {
        let items = corpus();
        let filter = NewsFilter {
            company: vec!["Nonexistent Corp".to_string()],
            relevance_categories: vec!["Nothing".to_string()],
            ..Default::default()
        };
        assert!(select_news(&items, &filter).is_empty());
    }

    #[test]
    fn test_news_sorted_by_date_then_gravity() {
        let now = Utc::now();
        let same = now - Duration::hours(1);
        let items = vec![
            news("Low", "Released", &[], "Tech", 10, false, same),
            news("Old", "Released", &[], "Tech", 100, false, now - Duration::days(1)),
            news("High", "Released", &[], "Tech", 90, false, same),
            news("Newest", "Released", &[], "Tech", 1, false, now),
        ];

        let companies: Vec<String> = select_news(&items, &NewsFilter::default())
            .into_iter()
            .map(|i| i.company)
            .collect();
        assert_eq!(companies, vec!["Newest", "High", "Low", "Old"]);
    }

    #[test]
    fn test_ordering_invariant_holds_for_every_pair() {
        let selected = select_news(&corpus(), &NewsFilter::default());
        for pair in selected.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(
                a.published_at > b.published_at
                    || (a.published_at == b.published_at && a.gravity_score >= b.gravity_score)
            );
        }
    }

    #[test]
    fn test_pagination_is_a_slice_of_the_full_sequence() {
        let items = corpus();
        let full = select_news(&items, &NewsFilter::default());

        let filter = NewsFilter {
            page: Pagination {
                offset: 1,
                limit: Some(2),
            },
            ..Default::default()
        };
        assert_eq!(select_news(&items, &filter), full[1..3].to_vec());

        let past_end = NewsFilter {
            page: Pagination {
                offset: 10,
                limit: Some(5),
            },
            ..Default::default()
        };
        assert!(select_news(&items, &past_end).is_empty());
    }

    #[test]
    fn test_paginate_without_limit_returns_rest() {
        assert_eq!(
            paginate(vec![1, 2, 3, 4], Pagination { offset: 1, limit: None }),
            vec![2, 3, 4]
        );
        assert_eq!(
            paginate(vec![1, 2, 3], Pagination { offset: 0, limit: Some(0) }),
            Vec::<i32>::new()
        );
    }

    #[test]
    fn test_pm_resource_filters() {
        let now = Utc::now();
        let resources = vec![
            resource("Framework", "Discovery", None, &["AI Strategy"], "Intermediate", now - Duration::minutes(3)),
            resource("Interview Questions", "Discovery", Some("OpenAI"), &["Interview Prep", "OpenAI"], "Advanced", now - Duration::minutes(2)),
            resource("Template", "Launch", None, &["Product Launch", "AI Safety"], "Advanced", now - Duration::minutes(1)),
        ];

        let by_company = PmResourceFilter {
            company: vec!["openai".to_string()],
            ..Default::default()
        };
        let selected = select_pm_resources(&resources, &by_company);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].resource_type, "Interview Questions");

        let by_tags_and_difficulty = PmResourceFilter {
            tags: vec!["AI Safety".to_string(), "OpenAI".to_string()],
            difficulty: vec!["Advanced".to_string()],
            ..Default::default()
        };
        let types: Vec<String> = select_pm_resources(&resources, &by_tags_and_difficulty)
            .into_iter()
            .map(|r| r.resource_type)
            .collect();
        assert_eq!(types, vec!["Template", "Interview Questions"]);

        let by_stage = PmResourceFilter {
            pm_stage: vec!["Discovery".to_string()],
            resource_type: vec!["Framework".to_string()],
            ..Default::default()
        };
        assert_eq!(select_pm_resources(&resources, &by_stage).len(), 1);

        let by_difficulties = PmResourceFilter {
            difficulty: vec!["Beginner".to_string(), "Intermediate".to_string()],
            ..Default::default()
        };
        let types: Vec<String> = select_pm_resources(&resources, &by_difficulties)
            .into_iter()
            .map(|r| r.resource_type)
            .collect();
        assert_eq!(types, vec!["Framework"]);
    }

    #[test]
    fn test_pm_resources_newest_first() {
        let now = Utc::now();
        let resources = vec![
            resource("A", "Discovery", None, &[], "Beginner", now - Duration::days(1)),
            resource("B", "Discovery", None, &[], "Beginner", now),
            resource("C", "Discovery", None, &[], "Beginner", now - Duration::hours(1)),
        ];
        let types: Vec<String> = select_pm_resources(&resources, &PmResourceFilter::default())
            .into_iter()
            .map(|r| r.resource_type)
            .collect();
        assert_eq!(types, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_distinct_keeps_first_seen_order() {
        let values = ["OpenAI", "Google", "OpenAI", "Anthropic", "Google"];
        assert_eq!(distinct(values), vec!["OpenAI", "Google", "Anthropic"]);
    }
}
