//! Heuristic relevance scoring for merged recipe candidates.
//!
//! Scores each candidate 0-100 from pantry overlap, cuisine keywords,
//! popularity, and record completeness. Works entirely offline, no
//! provider calls.

use crate::cuisine::CuisineProfile;
use crate::provider::RawCandidate;

/// Weights for the relevance scorer.
#[derive(Debug, Clone)]
pub struct ScorerConfig {
    /// Maximum points for pantry/ingredient-list overlap.
    pub ingredient_points: f64,
    /// Points granted per matched cuisine keyword.
    pub keyword_points: f64,
    /// Cap for the cuisine keyword component.
    pub cuisine_points: f64,
    /// Cap for the popularity component.
    pub popularity_points: f64,
    /// Like count at which the popularity component reaches half its cap.
    pub popularity_midpoint: f64,
    /// Points granted for a present image, and again for instructions.
    pub completeness_points: f64,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            ingredient_points: 40.0,
            keyword_points: 5.0,
            cuisine_points: 25.0,
            popularity_points: 15.0,
            popularity_midpoint: 100.0,
            completeness_points: 10.0,
        }
    }
}

/// A candidate with its computed relevance score and a short explanation.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub candidate: RawCandidate,
    /// Composite score, clamped to 0-100.
    pub score: f64,
    pub reason: String,
}

/// Heuristic candidate scorer.
///
/// Scores candidates by:
/// 1. How much of the recipe's ingredient list the pantry covers
/// 2. Cuisine keyword presence in title and cuisine tags
/// 3. Popularity (like count, saturating)
/// 4. Record completeness (image, instructions)
pub struct RelevanceScorer {
    config: ScorerConfig,
}

impl RelevanceScorer {
    /// Create a scorer with default weights.
    pub fn new() -> Self {
        Self {
            config: ScorerConfig::default(),
        }
    }

    /// Create a scorer with custom weights.
    pub fn with_config(config: ScorerConfig) -> Self {
        Self { config }
    }

    /// Score every candidate and sort best-first.
    ///
    /// Ties break on `layer_priority` ascending (more authoritative search
    /// layer first), then on provider id ascending, so equal-scoring inputs
    /// always rank the same way.
    pub fn score_and_rank(
        &self,
        candidates: Vec<RawCandidate>,
        searched: &str,
        pantry: &[String],
        profile: &CuisineProfile,
    ) -> Vec<ScoredCandidate> {
        let mut scored: Vec<ScoredCandidate> = candidates
            .into_iter()
            .map(|c| self.score_candidate(&c, searched, pantry, profile))
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.candidate.layer_priority.cmp(&b.candidate.layer_priority))
                .then_with(|| a.candidate.id.cmp(&b.candidate.id))
        });

        scored
    }

    /// Score a single candidate.
    fn score_candidate(
        &self,
        candidate: &RawCandidate,
        searched: &str,
        pantry: &[String],
        profile: &CuisineProfile,
    ) -> ScoredCandidate {
        let ingredient_ratio = self.ingredient_match(candidate, searched, pantry);
        let matched = self.matched_keywords(candidate, profile);
        let popularity_ratio = self.popularity_ratio(candidate);

        let total = ingredient_ratio * self.config.ingredient_points
            + (matched.len() as f64 * self.config.keyword_points).min(self.config.cuisine_points)
            + popularity_ratio * self.config.popularity_points
            + self.completeness_points(candidate);

        let reason = self.reason(ingredient_ratio, &matched, candidate);

        ScoredCandidate {
            candidate: candidate.clone(),
            score: total.clamp(0.0, 100.0),
            reason,
        }
    }

    /// Fraction of the recipe's ingredient list covered by the searched
    /// ingredient plus the pantry (0.0-1.0).
    fn ingredient_match(&self, candidate: &RawCandidate, searched: &str, pantry: &[String]) -> f64 {
        let mut needles: Vec<String> = Vec::with_capacity(pantry.len() + 1);
        let searched = searched.trim().to_lowercase();
        if !searched.is_empty() {
            needles.push(searched);
        }
        for name in pantry {
            let name = name.trim().to_lowercase();
            if !name.is_empty() && !needles.contains(&name) {
                needles.push(name);
            }
        }

        if candidate.ingredients.is_empty() {
            // Query-layer results often omit the ingredient list; fall back
            // to the provider's own used/missed counts when present.
            let total = candidate.used_ingredient_count + candidate.missed_ingredient_count;
            if total == 0 {
                return 0.5; // Nothing to match against
            }
            return f64::from(candidate.used_ingredient_count) / f64::from(total);
        }

        let matched = candidate
            .ingredients
            .iter()
            .map(|line| line.to_lowercase())
            .filter(|line| needles.iter().any(|needle| line.contains(needle)))
            .count();

        matched as f64 / candidate.ingredients.len() as f64
    }

    /// Cuisine profile keywords found in the title or cuisine tags.
    fn matched_keywords(
        &self,
        candidate: &RawCandidate,
        profile: &CuisineProfile,
    ) -> Vec<&'static str> {
        let mut haystack = candidate.title.to_lowercase();
        for tag in &candidate.cuisines {
            haystack.push(' ');
            haystack.push_str(&tag.to_lowercase());
        }

        profile
            .all_keywords()
            .filter(|kw| haystack.contains(kw))
            .collect()
    }

    /// Saturating popularity score (0.0-1.0), 0.5 at the midpoint.
    fn popularity_ratio(&self, candidate: &RawCandidate) -> f64 {
        if candidate.likes == 0 {
            return 0.0;
        }
        let likes = f64::from(candidate.likes);
        likes / (likes + self.config.popularity_midpoint)
    }

    /// Points for having an image and non-empty instructions.
    fn completeness_points(&self, candidate: &RawCandidate) -> f64 {
        let mut points = 0.0;
        if matches!(candidate.image.as_deref(), Some(url) if !url.trim().is_empty()) {
            points += self.config.completeness_points;
        }
        if matches!(candidate.instructions.as_deref(), Some(text) if !text.trim().is_empty()) {
            points += self.config.completeness_points;
        }
        points
    }

    /// Generate a short human-readable explanation for the score.
    fn reason(
        &self,
        ingredient_ratio: f64,
        matched: &[&'static str],
        candidate: &RawCandidate,
    ) -> String {
        let mut parts: Vec<String> = Vec::new();

        let no_ingredient_data = candidate.ingredients.is_empty()
            && candidate.used_ingredient_count + candidate.missed_ingredient_count == 0;
        if no_ingredient_data {
            parts.push("no ingredient data".to_string());
        } else if ingredient_ratio >= 0.99 {
            parts.push("all listed ingredients on hand".to_string());
        } else if ingredient_ratio >= 0.6 {
            parts.push("most ingredients on hand".to_string());
        } else if ingredient_ratio >= 0.3 {
            parts.push("partial ingredient overlap".to_string());
        } else if ingredient_ratio > 0.0 {
            parts.push("few matching ingredients".to_string());
        } else {
            parts.push("no ingredient overlap".to_string());
        }

        if !matched.is_empty() {
            parts.push(format!("has {}", matched.join("+")));
        }

        if f64::from(candidate.likes) >= self.config.popularity_midpoint {
            parts.push(format!("{} likes", candidate.likes));
        }

        if !matches!(candidate.image.as_deref(), Some(url) if !url.trim().is_empty()) {
            parts.push("no image".to_string());
        }
        if !matches!(candidate.instructions.as_deref(), Some(text) if !text.trim().is_empty()) {
            parts.push("no instructions".to_string());
        }

        parts.join(", ")
    }
}

impl Default for RelevanceScorer {
    fn default() -> Self {
        Self::new()
    }
}
