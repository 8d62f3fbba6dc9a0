// Synthetic news corpus used to seed the in-memory index

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::search::Document;

const TITLES: &[&str] = &[
    "Breaking News",
    "Market Update",
    "Tech News",
    "Sports Report",
    "Weather Alert",
    "Economic Analysis",
    "Political Development",
    "Health Research",
    "Environmental Study",
    "Innovation Report",
    "Cultural Event",
    "Education Reform",
    "Transportation Update",
];

const PARAGRAPHS: &[&str] = &[
    "In a rapidly evolving digital landscape, organizations across various sectors are experiencing unprecedented challenges and opportunities. The integration of advanced technologies has fundamentally transformed how businesses operate, communicate, and deliver value to their stakeholders.",
    "Recent studies indicate that companies implementing comprehensive digital transformation strategies report significant improvements in operational efficiency and customer satisfaction. These findings highlight the critical importance of strategic planning and resource allocation in today's competitive environment.",
    "Industry experts emphasize that successful adaptation requires not only technological investment but also cultural shifts within organizations. Leadership teams must foster innovation while maintaining operational stability and regulatory compliance.",
    "The implications of these developments extend beyond individual companies to entire economic ecosystems. Supply chain relationships, market dynamics, and consumer expectations continue to evolve at an accelerating pace.",
    "Data analytics and artificial intelligence have emerged as key differentiators in this transformation. Organizations leveraging these capabilities demonstrate enhanced decision-making processes and more effective resource utilization.",
    "Furthermore, sustainability considerations have become integral to strategic planning. Companies are increasingly required to balance profitability with environmental responsibility and social impact.",
    "The global nature of modern commerce presents both opportunities for expansion and challenges related to regulatory compliance across different jurisdictions. International partnerships and collaboration have become essential for sustained growth.",
    "As we look toward the future, the ability to adapt quickly to changing circumstances while maintaining core business values will determine long-term success. Investment in human capital and continuous learning remains paramount.",
];

/// Paragraph count range per article body (inclusive)
const MIN_PARAGRAPHS: usize = 4;
const MAX_PARAGRAPHS: usize = 6;

/// Generates news articles numbered from 1
pub struct CorpusGenerator {
    rng: StdRng,
}

impl CorpusGenerator {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Build a single article
    pub fn article(&mut self, number: u64, published: bool) -> Document {
        let title = TITLES[self.rng.gen_range(0..TITLES.len())];
        let paragraphs = self.rng.gen_range(MIN_PARAGRAPHS..=MAX_PARAGRAPHS);
        let body = format!(
            "{} Article number {}.",
            PARAGRAPHS[..paragraphs].join("\n\n"),
            number
        );

        Document {
            id: number,
            title: format!("{} #{}", title, number),
            body,
            published,
        }
    }

    /// Generate `total` articles; the last `drafts` of them are unpublished
    pub fn generate(&mut self, total: u64, drafts: u64) -> Vec<Document> {
        let drafts = drafts.min(total);
        let first_draft = total - drafts + 1;

        let docs: Vec<Document> = (1..=total)
            .map(|n| self.article(n, n < first_draft))
            .collect();

        tracing::debug!(total, drafts, "Generated synthetic corpus");
        docs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_shape() {
        let mut generator = CorpusGenerator::new(Some(7));
        let doc = generator.article(42, true);

        assert_eq!(doc.id, 42);
        assert!(doc.title.ends_with(" #42"));
        assert!(TITLES.iter().any(|t| doc.title.starts_with(t)));
        assert!(doc.body.ends_with(" Article number 42."));

        let paragraphs = doc.body.split("\n\n").count();
        assert!((MIN_PARAGRAPHS..=MAX_PARAGRAPHS).contains(&paragraphs));
    }

    #[test]
    fn test_generate_marks_trailing_drafts() {
        let mut generator = CorpusGenerator::new(Some(1));
        let docs = generator.generate(10, 3);

        assert_eq!(docs.len(), 10);
        assert!(docs[..7].iter().all(|d| d.published));
        assert!(docs[7..].iter().all(|d| !d.published));
    }

    #[test]
    fn test_generate_caps_drafts_at_total() {
        let mut generator = CorpusGenerator::new(Some(1));
        let docs = generator.generate(2, 5);
        assert!(docs.iter().all(|d| !d.published));
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let a = CorpusGenerator::new(Some(99)).generate(20, 0);
        let b = CorpusGenerator::new(Some(99)).generate(20, 0);
        assert_eq!(a, b);
    }
}
