use crate::models::{RoutingDecision, SearchType};
use log::debug;

/// Terms that point at watchable content.
const VIDEO_KEYWORDS: &[&str] = &[
    "動画", "ビデオ", "講座", "チュートリアル", "tutorial", "how to", "やり方", "解説", "実演",
    "demo", "プレゼン", "音楽", "music", "song", "歌", "ライブ", "live", "配信", "stream", "vlog",
    "レビュー", "review", "実況", "ゲーム", "game", "アニメ", "anime", "ドラマ", "drama", "映画",
    "movie", "trailer", "mv", "pv", "コメディ", "comedy",
];

/// Terms that point at reference text, news or shopping.
const WEB_KEYWORDS: &[&str] = &[
    "とは", "とは何", "定義", "意味", "meaning", "definition", "wiki", "ニュース", "news", "最新",
    "latest", "情報", "info", "information", "公式", "official", "サイト", "site", "website",
    "ホームページ", "価格", "値段", "price", "料金", "cost", "比較", "comparison", "レポート",
    "report", "記事", "article", "研究", "research", "ダウンロード", "download", "インストール",
    "install", "設定",
];

/// Learning queries benefit from both videos and articles.
const LEARNING_KEYWORDS: &[&str] = &[
    "学習", "勉強", "習得", "learn", "study", "覚える", "身につける", "入門", "初心者", "beginner",
    "基礎", "basic", "上達", "improve",
];

const HOW_TO_MARKERS: &[&str] = &["やり方", "how to"];
const COURSE_MARKERS: &[&str] = &["講座", "tutorial"];

const HOW_TO_VIDEO_SUFFIX: &str = "解説 チュートリアル";
const HOW_TO_WEB_SUFFIX: &str = "方法 手順";
const COURSE_VIDEO_SUFFIX: &str = "入門 基礎";
const COURSE_WEB_SUFFIX: &str = "学習 リソース";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeywordScores {
    pub video: usize,
    pub web: usize,
    pub learning: usize,
}

/// Each keyword counts once, however often it occurs.
fn count_matches(query_lower: &str, keywords: &[&str]) -> usize {
    keywords
        .iter()
        .filter(|keyword| query_lower.contains(*keyword))
        .count()
}

pub fn score_query(query: &str) -> KeywordScores {
    let query_lower = query.to_lowercase();
    KeywordScores {
        video: count_matches(&query_lower, VIDEO_KEYWORDS),
        web: count_matches(&query_lower, WEB_KEYWORDS),
        learning: count_matches(&query_lower, LEARNING_KEYWORDS),
    }
}

fn decide(scores: KeywordScores) -> (SearchType, &'static str) {
    if scores.learning > 0 || (scores.video > 0 && scores.web > 0) {
        (
            SearchType::Both,
            "The query is about learning or comparison, so both videos and articles are useful",
        )
    } else if scores.video > scores.web {
        (
            SearchType::Youtube,
            "The query contains keywords about video content",
        )
    } else if scores.web > scores.video {
        (
            SearchType::Web,
            "The query contains keywords about information lookup or definitions",
        )
    } else {
        (
            SearchType::Both,
            "No clear preference could be determined, so both result types are shown",
        )
    }
}

/// Per-backend rewrites of the query; the first matching rule wins.
fn optimize_queries(query: &str) -> (String, String) {
    let query_lower = query.to_lowercase();
    let has_any = |markers: &[&str]| markers.iter().any(|marker| query_lower.contains(marker));

    if has_any(HOW_TO_MARKERS) {
        (
            format!("{query} {HOW_TO_VIDEO_SUFFIX}"),
            format!("{query} {HOW_TO_WEB_SUFFIX}"),
        )
    } else if has_any(COURSE_MARKERS) {
        (
            format!("{query} {COURSE_VIDEO_SUFFIX}"),
            format!("{query} {COURSE_WEB_SUFFIX}"),
        )
    } else {
        (query.to_string(), query.to_string())
    }
}

/// Keyword-scoring classifier used when the language model is unavailable.
pub fn classify_locally(query: &str) -> RoutingDecision {
    let scores = score_query(query);
    let (search_type, reasoning) = decide(scores);
    let (optimized_youtube_query, optimized_web_query) = optimize_queries(query);

    debug!("Local analysis of {query:?}: {scores:?} -> {search_type:?}");

    RoutingDecision {
        search_type,
        optimized_youtube_query,
        optimized_web_query,
        reasoning: reasoning.to_string(),
        bedrock_raw_response: None,
    }
}
