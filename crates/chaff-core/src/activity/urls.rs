//! URL and title synthesis for generated activities.
//!
//! Plausible-looking destinations keyed by activity type and interest.
//! Nothing here is ever fetched.

use rand::seq::SliceRandom;
use rand::Rng;

use super::ActivityType;
use crate::profile::InterestCategory;

const SEARCH_ENGINES: &[&str] = &["google.com", "bing.com", "duckduckgo.com"];
const SHOPPING_DOMAINS: &[&str] = &[
    "amazon.com",
    "ebay.com",
    "etsy.com",
    "walmart.com",
    "bestbuy.com",
];
const NEWS_DOMAINS: &[&str] = &[
    "bbc.com",
    "cnn.com",
    "reuters.com",
    "theguardian.com",
    "nytimes.com",
];
const RESEARCH_DOMAINS: &[&str] = &[
    "wikipedia.org",
    "britannica.com",
    "scholar.google.com",
    "arxiv.org",
];
const SOCIAL_PLATFORMS: &[(&str, &str)] = &[
    ("twitter.com", "Twitter"),
    ("reddit.com", "Reddit"),
    ("facebook.com", "Facebook"),
    ("instagram.com", "Instagram"),
    ("linkedin.com", "LinkedIn"),
];

pub(super) struct UrlGenerator;

impl UrlGenerator {
    pub fn generate<R: Rng>(
        &self,
        activity_type: ActivityType,
        interest: Option<InterestCategory>,
        rng: &mut R,
    ) -> (String, String) {
        match activity_type {
            ActivityType::Search => self.search(interest, rng),
            ActivityType::VideoWatch => self.video(interest, rng),
            ActivityType::Shopping => self.shopping(interest, rng),
            ActivityType::SocialMedia => self.social(rng),
            ActivityType::News => self.news(interest, rng),
            ActivityType::Research => self.research(interest, rng),
            ActivityType::PageVisit => self.page(interest, rng),
        }
    }

    fn search<R: Rng>(&self, interest: Option<InterestCategory>, rng: &mut R) -> (String, String) {
        let query = search_query(interest, rng);
        let engine = pick(SEARCH_ENGINES, rng);
        let url = format!("https://{engine}/search?q={}", query.replace(' ', "+"));
        (url, format!("{query} - Search"))
    }

    fn video<R: Rng>(&self, interest: Option<InterestCategory>, rng: &mut R) -> (String, String) {
        let title = video_title(interest, rng);
        let url = if rng.gen_bool(0.8) {
            format!("https://www.youtube.com/watch?v={}", video_id(rng))
        } else {
            format!("https://vimeo.com/{}", rng.gen_range(100_000_000..999_999_999))
        };
        (url, title)
    }

    fn shopping<R: Rng>(
        &self,
        interest: Option<InterestCategory>,
        rng: &mut R,
    ) -> (String, String) {
        let product = product_name(interest, rng);
        let domain = pick(SHOPPING_DOMAINS, rng);
        let url = format!(
            "https://{domain}/products/{}",
            product.to_lowercase().replace(' ', "-")
        );
        (url, format!("{product} - {}", site_name(domain)))
    }

    fn social<R: Rng>(&self, rng: &mut R) -> (String, String) {
        let (domain, name) = SOCIAL_PLATFORMS
            .choose(rng)
            .copied()
            .unwrap_or(("reddit.com", "Reddit"));
        (format!("https://{domain}"), format!("Home - {name}"))
    }

    fn news<R: Rng>(&self, interest: Option<InterestCategory>, rng: &mut R) -> (String, String) {
        let domain = pick(NEWS_DOMAINS, rng);
        let headline = news_headline(interest, rng);
        let slug: String = headline
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() || c == ' ' { c } else { ' ' })
            .collect::<String>()
            .split_whitespace()
            .take(8)
            .collect::<Vec<_>>()
            .join("-");
        let url = format!("https://{domain}/article/{slug}");
        (url, format!("{headline} - {}", site_name(domain)))
    }

    fn research<R: Rng>(
        &self,
        interest: Option<InterestCategory>,
        rng: &mut R,
    ) -> (String, String) {
        let domain = pick(RESEARCH_DOMAINS, rng);
        let topic = research_topic(interest, rng);
        let url = if domain.contains("wikipedia") {
            format!("https://{domain}/wiki/{}", topic.replace(' ', "_"))
        } else {
            format!(
                "https://{domain}/article/{}",
                topic.to_lowercase().replace(' ', "-")
            )
        };
        (url, format!("{topic} - {}", site_name(domain)))
    }

    fn page<R: Rng>(&self, interest: Option<InterestCategory>, rng: &mut R) -> (String, String) {
        let domain = interest_domain(interest, rng);
        let page = match interest {
            Some(cat) => format!("{cat:?} Information"),
            None => "General Page".to_string(),
        };
        let url = format!("https://{domain}/{}", page.to_lowercase().replace(' ', "-"));
        (url, format!("{page} | {}", site_name(domain)))
    }
}

fn pick<'a, R: Rng>(pool: &[&'a str], rng: &mut R) -> &'a str {
    pool.choose(rng).copied().unwrap_or("example.com")
}

fn site_name(domain: &str) -> &str {
    domain.split('.').next().unwrap_or(domain)
}

fn video_id<R: Rng>(rng: &mut R) -> String {
    const CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";
    (0..11)
        .map(|_| CHARS[rng.gen_range(0..CHARS.len())] as char)
        .collect()
}

fn search_query<R: Rng>(interest: Option<InterestCategory>, rng: &mut R) -> String {
    let queries: &[&str] = match interest {
        Some(InterestCategory::Technology) => &[
            "latest smartphones",
            "cloud computing trends",
            "AI news",
            "tech reviews",
        ],
        Some(InterestCategory::Gaming) => &[
            "best games 2024",
            "gaming benchmarks",
            "esports tournament",
            "game reviews",
        ],
        Some(InterestCategory::Sports) => &[
            "football scores",
            "NBA highlights",
            "soccer news",
            "sports statistics",
        ],
        Some(InterestCategory::Cooking) => &[
            "easy recipes",
            "meal prep ideas",
            "cooking techniques",
            "healthy meals",
        ],
        Some(InterestCategory::Travel) => &[
            "travel destinations",
            "cheap flights",
            "hotel reviews",
            "travel tips",
        ],
        Some(InterestCategory::Finance) => &[
            "stock market news",
            "investment strategies",
            "crypto prices",
            "financial planning",
        ],
        Some(InterestCategory::Programming) => &[
            "rust tutorial",
            "typescript best practices",
            "algorithm examples",
            "code review",
        ],
        Some(_) => &["latest news", "trending topics", "popular articles", "how to"],
        None => &["news", "weather", "recipes", "reviews"],
    };
    pick(queries, rng).to_string()
}

fn video_title<R: Rng>(interest: Option<InterestCategory>, rng: &mut R) -> String {
    let titles: &[&str] = match interest {
        Some(InterestCategory::Technology) => &[
            "Tech Review: Latest Gadgets",
            "Programming Tutorial",
            "Tech News Weekly",
        ],
        Some(InterestCategory::Gaming) => &["Gameplay Walkthrough", "Gaming News", "Top 10 Games"],
        Some(InterestCategory::Cooking) => {
            &["Quick Recipe Tutorial", "Cooking Tips", "Chef's Special"]
        }
        Some(InterestCategory::Music) => {
            &["Official Music Video", "Live Performance", "Music Review"]
        }
        Some(InterestCategory::Fitness) => &["Workout Routine", "Fitness Tips", "Exercise Guide"],
        _ => &["Popular Video", "Trending Content", "Featured Video"],
    };
    pick(titles, rng).to_string()
}

fn product_name<R: Rng>(interest: Option<InterestCategory>, rng: &mut R) -> String {
    let products: &[&str] = match interest {
        Some(InterestCategory::Technology) => &[
            "Wireless Headphones",
            "Smart Watch",
            "Laptop Stand",
            "USB Cable",
        ],
        Some(InterestCategory::Gaming) => &[
            "Gaming Mouse",
            "Mechanical Keyboard",
            "Gaming Chair",
            "Headset",
        ],
        Some(InterestCategory::Fitness) => &[
            "Yoga Mat",
            "Resistance Bands",
            "Water Bottle",
            "Protein Powder",
        ],
        Some(InterestCategory::Cooking) => &[
            "Chef Knife",
            "Cutting Board",
            "Cookware Set",
            "Kitchen Gadget",
        ],
        Some(InterestCategory::Fashion) => {
            &["Designer Jacket", "Sneakers", "Watch", "Sunglasses"]
        }
        _ => &["Popular Item", "Bestseller", "Featured Product", "Top Rated"],
    };
    pick(products, rng).to_string()
}

fn news_headline<R: Rng>(interest: Option<InterestCategory>, rng: &mut R) -> String {
    let headlines: &[&str] = match interest {
        Some(InterestCategory::Technology) => &[
            "Major Tech Company Announces New Product",
            "Breakthrough in AI Research",
            "Cybersecurity Alert",
        ],
        Some(InterestCategory::Politics) => &[
            "Election Results Coming In",
            "Policy Change Announced",
            "Political Summit Concludes",
        ],
        Some(InterestCategory::Sports) => &[
            "Championship Game Recap",
            "Player Breaks Record",
            "Team Makes Playoffs",
        ],
        Some(InterestCategory::Science) => &[
            "New Scientific Discovery",
            "Research Findings Published",
            "Space Mission Update",
        ],
        _ => &["Breaking News", "Latest Updates", "Today's Top Stories"],
    };
    pick(headlines, rng).to_string()
}

fn research_topic<R: Rng>(interest: Option<InterestCategory>, rng: &mut R) -> String {
    let topics: &[&str] = match interest {
        Some(InterestCategory::Science) => {
            &["Quantum Physics", "Climate Change", "Genetics", "Astronomy"]
        }
        Some(InterestCategory::Technology) => &[
            "Machine Learning",
            "Blockchain",
            "Quantum Computing",
            "Cybersecurity",
        ],
        Some(InterestCategory::Programming) => &[
            "Design Patterns",
            "Data Structures",
            "Algorithms",
            "Software Architecture",
        ],
        Some(InterestCategory::DataScience) => &[
            "Statistical Analysis",
            "Data Visualization",
            "Predictive Modeling",
            "Big Data",
        ],
        _ => &[
            "General Knowledge",
            "Encyclopedia",
            "Reference Material",
            "Study Guide",
        ],
    };
    pick(topics, rng).to_string()
}

fn interest_domain<'a, R: Rng>(interest: Option<InterestCategory>, rng: &mut R) -> &'a str {
    match interest {
        Some(InterestCategory::Technology) => {
            pick(&["techcrunch.com", "theverge.com", "arstechnica.com"], rng)
        }
        Some(InterestCategory::Gaming) => pick(&["ign.com", "gamespot.com", "polygon.com"], rng),
        Some(InterestCategory::Sports) => pick(&["espn.com", "bleacherreport.com", "si.com"], rng),
        Some(InterestCategory::Cooking) => pick(
            &["allrecipes.com", "foodnetwork.com", "bonappetit.com"],
            rng,
        ),
        _ => "example.com",
    }
}
