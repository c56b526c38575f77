//! Static research catalogue
//!
//! The trend, opportunity and reference tables are fixed research data
//! (June 2025 vintage). Nothing in the engine mutates them; a dashboard
//! refresh produces a perturbed copy (see `session`).

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{
    DataFreshness, ExposureLevel, IndustryAdoption, MarketFacts, MarketSizeCategory,
    MaturityLevel, OpportunityRecord, RegionalMarket, ResearchSources, TimeHorizon, TrendRecord,
    WorkforceImpact,
};

/// Vintage label of the research data
pub const DATA_VINTAGE: &str = "June 2025";

/// Days until the next scheduled data update
const UPDATE_INTERVAL_DAYS: i64 = 30;

/// Every table the dashboard presents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub trends: Vec<TrendRecord>,
    pub opportunities: Vec<OpportunityRecord>,
    pub regions: Vec<RegionalMarket>,
    pub industries: Vec<IndustryAdoption>,
    pub workforce: Vec<WorkforceImpact>,
    pub market: MarketFacts,
    pub sources: ResearchSources,
}

impl Catalog {
    /// The full research catalogue: 20 trends, 15 opportunities and the
    /// regional, industry and workforce reference tables
    pub fn comprehensive() -> Self {
        Self {
            trends: trends(),
            opportunities: opportunities(),
            regions: regions(),
            industries: industries(),
            workforce: workforce(),
            market: market_facts(),
            sources: research_sources(),
        }
    }

    pub fn trend(&self, name: &str) -> Option<&TrendRecord> {
        self.trends.iter().find(|t| t.name == name)
    }

    pub fn opportunity(&self, area: &str) -> Option<&OpportunityRecord> {
        self.opportunities.iter().find(|o| o.area == area)
    }

    /// Trends referenced by an opportunity that exist in this catalogue.
    ///
    /// Related-trend names are loose references; unknown names are skipped.
    pub fn related_trends(&self, opportunity: &OpportunityRecord) -> Vec<&TrendRecord> {
        opportunity
            .related_trends
            .iter()
            .filter_map(|name| self.trend(name))
            .collect()
    }
}

fn list(s: &str) -> Vec<String> {
    s.split(", ").map(|p| p.trim().to_string()).collect()
}

/// (name, impact, horizon, market size $B, adoption %, description, key players)
type TrendRow = (
    &'static str,
    f64,
    TimeHorizon,
    f64,
    f64,
    &'static str,
    &'static str,
);

#[rustfmt::skip]
const TREND_ROWS: [TrendRow; 20] = {
    use TimeHorizon::{Dominant as D, Emerging as E, Future as F};
    [
        ("Agentic AI Enterprise Deployment", 9.5, D, 285.5, 25.0,
         "25% of enterprises deploying AI agents in 2025, growing to 50% by 2027. Autonomous systems handling complex business processes with minimal human intervention.",
         "OpenAI, Microsoft, Google, Anthropic"),
        ("Multimodal AI Integration", 9.2, D, 156.8, 40.0,
         "40% of generative AI solutions becoming multimodal by 2027. Integration of text, image, audio, and video processing in unified AI systems.",
         "Google, Meta, OpenAI, Adobe"),
        ("AI Governance & Compliance (EU AI Act)", 8.8, D, 89.2, 65.0,
         "EU AI Act full implementation driving global compliance standards. 65% of enterprises implementing AI governance frameworks by end of 2025.",
         "IBM, Microsoft, SAP, Palantir"),
        ("Small Language Models (SLMs) Adoption", 8.5, E, 67.3, 18.0,
         "Shift from large language models to specialized, efficient small models. 18% adoption rate growing rapidly due to cost and efficiency benefits.",
         "Anthropic, Mistral, Cohere, Hugging Face"),
        ("AI-Powered Software Development", 9.0, D, 198.4, 52.0,
         "AI transforming software development with 52% of developers using AI tools. Code generation, debugging, and automated testing becoming standard.",
         "GitHub, JetBrains, Replit, Tabnine"),
        ("Enterprise AI Agents & Automation", 9.3, D, 234.7, 35.0,
         "90% of companies reporting workflow improvements with AI agents. Automation of specialized knowledge work and business process optimization.",
         "UiPath, Automation Anywhere, Microsoft"),
        ("AI in Healthcare Diagnostics", 8.9, E, 102.7, 28.0,
         "Healthcare AI market reaching $102.7B by 2028. 73% of hospitals using AI for diagnosis and treatment recommendations.",
         "Google Health, IBM Watson, Philips"),
        ("Sustainable AI & Green Computing", 7.8, F, 45.6, 12.0,
         "Growing focus on energy-efficient AI infrastructure. Sustainable data centers and green computing initiatives addressing environmental concerns.",
         "NVIDIA, Intel, AMD, Google"),
        ("AI Workforce Augmentation", 9.1, D, 167.9, 67.0,
         "67% of organizations investing in AI workforce augmentation. Human-AI collaboration models replacing job displacement fears.",
         "Microsoft, Salesforce, ServiceNow"),
        ("Real-time AI Decision Making", 8.7, E, 78.4, 22.0,
         "Real-time AI decision making in critical business operations. Edge computing enabling instant AI responses in manufacturing and logistics.",
         "NVIDIA, Intel, Qualcomm, AWS"),
        ("AI-Driven Cybersecurity", 8.6, D, 123.5, 45.0,
         "AI-powered cybersecurity becoming essential. 45% adoption rate for AI-driven threat detection and response systems.",
         "CrowdStrike, Palo Alto, Microsoft"),
        ("Conversational AI Evolution", 8.4, D, 89.7, 58.0,
         "Evolution beyond chatbots to sophisticated conversational AI. 58% of customer service operations using advanced AI assistants.",
         "OpenAI, Google, Amazon, Meta"),
        ("AI in Financial Services", 8.8, D, 245.8, 48.0,
         "Financial services leading AI adoption with $245.8B market size. Fraud detection, risk management, and automated trading systems.",
         "JPMorgan, Goldman Sachs, Visa"),
        ("Edge AI Computing", 8.2, E, 56.2, 15.0,
         "Edge AI processing growing with IoT expansion. 15% current adoption expected to reach 40% by 2027 for real-time applications.",
         "NVIDIA, Qualcomm, Intel, ARM"),
        ("AI Ethics & Responsible AI", 8.9, D, 34.8, 71.0,
         "71% of enterprises implementing AI ethics frameworks. Responsible AI practices becoming regulatory and competitive requirements.",
         "IBM, Microsoft, Google, Anthropic"),
        ("AI-Powered Content Creation", 8.3, D, 145.6, 62.0,
         "AI content creation tools reaching mainstream adoption. 62% of marketing teams using AI for content generation and optimization.",
         "Adobe, Canva, Jasper, Copy.ai"),
        ("Quantum-AI Hybrid Systems", 7.5, F, 12.3, 3.0,
         "Early-stage quantum-AI hybrid systems for complex problem solving. 3% adoption in research institutions and tech giants.",
         "IBM, Google, Microsoft, Rigetti"),
        ("AI in Supply Chain Optimization", 8.5, E, 98.7, 31.0,
         "AI optimizing global supply chains with 31% adoption rate. Predictive analytics and automated logistics management.",
         "SAP, Oracle, Palantir, C3.ai"),
        ("Personalized AI Assistants", 8.1, D, 67.8, 44.0,
         "Personalized AI assistants becoming ubiquitous. 44% of consumers using AI-powered personal productivity tools.",
         "Apple, Google, Amazon, Microsoft"),
        ("AI-Enhanced Customer Experience", 8.7, D, 134.2, 56.0,
         "AI enhancing customer experience across industries. 56% of businesses implementing AI-driven personalization systems.",
         "Salesforce, Adobe, HubSpot, Zendesk"),
    ]
};

/// The 20-row comprehensive trend table
pub fn trends() -> Vec<TrendRecord> {
    TREND_ROWS
        .iter()
        .map(
            |&(name, impact, horizon, size, adoption, description, players)| TrendRecord {
                name: name.to_string(),
                impact_score: impact,
                time_horizon: horizon,
                market_size_billion: size,
                adoption_rate: adoption,
                description: description.to_string(),
                key_players: list(players),
            },
        )
        .collect()
}

/// (area, size category, lower bound $B, CAGR, focus, maturity, related trends, challenges, success factors)
type OpportunityRow = (
    &'static str,
    MarketSizeCategory,
    f64,
    f64,
    f64,
    MaturityLevel,
    &'static str,
    &'static str,
    &'static str,
);

#[rustfmt::skip]
const OPPORTUNITY_ROWS: [OpportunityRow; 15] = {
    use MarketSizeCategory::{Large as L, Medium as M};
    use MaturityLevel::{CriticalNeed as C, EarlyGrowth as G, Emerging as E, Mature as X};
    [
        ("Agentic AI Platforms & Solutions", L, 285.0, 28.5, 9.2, G,
         "Agentic AI Enterprise Deployment, Enterprise AI Agents",
         "Technical complexity, integration costs",
         "Robust AI models, enterprise integration"),
        ("AI Governance & Compliance Services", M, 89.0, 35.2, 8.8, E,
         "AI Governance & Compliance, AI Ethics & Responsible AI",
         "Regulatory uncertainty, compliance costs",
         "Regulatory expertise, automated compliance"),
        ("Multimodal AI Development Tools", L, 157.0, 31.8, 8.9, G,
         "Multimodal AI Integration, AI-Powered Content Creation",
         "Data integration, model training complexity",
         "Advanced ML capabilities, user experience"),
        ("AI-Powered Software Development", L, 198.0, 26.7, 8.7, X,
         "AI-Powered Software Development, Enterprise AI Integration",
         "Developer adoption, tool integration",
         "Developer ecosystem, seamless workflows"),
        ("Enterprise AI Integration Services", L, 235.0, 24.3, 8.5, X,
         "AI Workforce Augmentation, Enterprise AI Agents",
         "Legacy system integration, change management",
         "Change management, ROI demonstration"),
        ("AI Workforce Training & Reskilling", M, 68.0, 42.1, 9.1, C,
         "AI Workforce Augmentation, AI Ethics & Responsible AI",
         "Skill gaps, training effectiveness",
         "Practical curricula, industry partnerships"),
        ("Sustainable AI Infrastructure", M, 46.0, 38.9, 7.8, E,
         "Sustainable AI & Green Computing, Edge AI Computing",
         "Energy costs, infrastructure investment",
         "Energy efficiency, scalable architecture"),
        ("AI-Enhanced Cybersecurity", L, 124.0, 29.4, 8.6, X,
         "AI-Driven Cybersecurity, Real-time AI Decision Making",
         "Threat evolution, false positives",
         "Real-time detection, adaptive learning"),
        ("Healthcare AI Solutions", L, 103.0, 33.6, 8.4, G,
         "AI in Healthcare Diagnostics, AI Ethics & Responsible AI",
         "Regulatory approval, data privacy",
         "Clinical validation, regulatory approval"),
        ("AI-Driven Financial Services", L, 246.0, 22.8, 8.9, X,
         "AI in Financial Services, AI Governance & Compliance",
         "Risk management, regulatory compliance",
         "Risk modeling, regulatory compliance"),
        ("Edge AI Computing Solutions", M, 56.0, 45.2, 8.2, E,
         "Edge AI Computing, Real-time AI Decision Making",
         "Hardware limitations, connectivity",
         "Optimized hardware, efficient algorithms"),
        ("AI Content Creation Platforms", L, 146.0, 27.9, 8.3, X,
         "AI-Powered Content Creation, Conversational AI Evolution",
         "Quality control, intellectual property",
         "Creative AI models, quality assurance"),
        ("Conversational AI Systems", M, 90.0, 25.6, 8.1, X,
         "Conversational AI Evolution, Personalized AI Assistants",
         "Natural language understanding, context",
         "Natural interaction, contextual understanding"),
        ("AI Supply Chain Optimization", M, 99.0, 32.4, 8.0, G,
         "AI in Supply Chain Optimization, Real-time AI Decision Making",
         "Data quality, system integration",
         "Data analytics, predictive modeling"),
        ("Personalized AI Assistants", M, 68.0, 29.8, 7.9, G,
         "Personalized AI Assistants, AI-Enhanced Customer Experience",
         "Privacy concerns, personalization accuracy",
         "Privacy protection, adaptive learning"),
    ]
};

/// The 15-row comprehensive opportunity table
pub fn opportunities() -> Vec<OpportunityRecord> {
    OPPORTUNITY_ROWS
        .iter()
        .map(
            |&(area, category, lower_bound, cagr, focus, maturity, related, challenges, factors)| {
                OpportunityRecord {
                    area: area.to_string(),
                    market_size_category: category,
                    market_size_lower_bound_billion: lower_bound,
                    growth_rate_cagr: cagr,
                    investment_focus_score: focus,
                    maturity_level: maturity,
                    related_trends: list(related),
                    key_challenges: list(challenges),
                    success_factors: list(factors),
                }
            },
        )
        .collect()
}

/// Regional market distribution
pub fn regions() -> Vec<RegionalMarket> {
    const ROWS: [(&str, f64, f64, f64, &str); 10] = [
        ("North America", 35.2, 22.5, 224.5, "Enterprise AI, Agentic Systems, AI Governance"),
        ("Europe", 23.8, 18.9, 151.8, "AI Regulation, Sustainable AI, Enterprise Solutions"),
        ("Asia-Pacific", 28.4, 31.2, 181.2, "Manufacturing AI, Edge Computing, Mobile AI"),
        ("China", 15.6, 28.7, 99.6, "AI Infrastructure, Manufacturing, Smart Cities"),
        ("Latin America", 4.2, 35.8, 26.8, "Financial AI, Agricultural AI, Healthcare AI"),
        ("Middle East & Africa", 3.8, 42.1, 24.2, "AI Education, Healthcare AI, Smart Cities"),
        ("India", 8.7, 38.9, 55.4, "IT Services AI, Healthcare AI, Financial AI"),
        ("Japan", 6.1, 19.4, 38.9, "Robotics AI, Manufacturing AI, Automotive AI"),
        ("South Korea", 3.9, 25.6, 24.8, "Consumer AI, Gaming AI, Entertainment AI"),
        ("Australia", 2.4, 21.3, 15.3, "Mining AI, Agricultural AI, Financial AI"),
    ];

    ROWS.iter()
        .map(|&(region, share, growth, investment, focus)| RegionalMarket {
            region: region.to_string(),
            market_share_percent: share,
            growth_rate: growth,
            investment_billion: investment,
            key_focus_areas: list(focus),
        })
        .collect()
}

/// Industry adoption rates and use cases
pub fn industries() -> Vec<IndustryAdoption> {
    const ROWS: [(&str, f64, f64, &str, f64); 15] = [
        ("Technology", 89.0, 156.0, "Code generation, DevOps automation, Product development", 9.1),
        ("Financial Services", 78.0, 134.0, "Fraud detection, Risk assessment, Algorithmic trading", 8.8),
        ("Healthcare", 65.0, 89.0, "Diagnostics, Drug discovery, Patient care optimization", 8.6),
        ("Manufacturing", 72.0, 112.0, "Predictive maintenance, Quality control, Supply chain", 8.4),
        ("Retail & E-commerce", 68.0, 98.0, "Personalization, Inventory management, Customer service", 8.2),
        ("Professional Services", 61.0, 87.0, "Document analysis, Client insights, Process automation", 7.9),
        ("Media & Entertainment", 74.0, 76.0, "Content creation, Recommendation systems, Production", 7.7),
        ("Transportation", 58.0, 94.0, "Route optimization, Autonomous vehicles, Logistics", 8.1),
        ("Energy & Utilities", 55.0, 78.0, "Grid optimization, Predictive maintenance, Demand forecasting", 7.8),
        ("Education", 49.0, 65.0, "Personalized learning, Administrative automation, Assessment", 7.5),
        ("Government", 42.0, 52.0, "Citizen services, Policy analysis, Security systems", 7.2),
        ("Real Estate", 38.0, 48.0, "Property valuation, Market analysis, Virtual tours", 6.9),
        ("Agriculture", 35.0, 71.0, "Crop monitoring, Yield prediction, Resource optimization", 7.3),
        ("Construction", 31.0, 43.0, "Project planning, Safety monitoring, Resource allocation", 6.8),
        ("Hospitality", 44.0, 59.0, "Guest personalization, Revenue optimization, Operations", 7.1),
    ];

    ROWS.iter()
        .map(|&(industry, adoption, roi, uses, priority)| IndustryAdoption {
            industry: industry.to_string(),
            adoption_rate: adoption,
            roi_percentage: roi,
            primary_use_cases: list(uses),
            investment_priority: priority,
        })
        .collect()
}

/// Workforce impact and reskilling priorities
pub fn workforce() -> Vec<WorkforceImpact> {
    use ExposureLevel::{High as H, Low as L, Medium as M, VeryHigh as V};
    let rows: [(&str, ExposureLevel, f64, &str, f64); 15] = [
        ("Software Development", H, 85.0, "AI/ML skills, Prompt engineering, AI tool proficiency", 9.2),
        ("Data Analysis", V, 92.0, "AI model interpretation, Advanced analytics, Data storytelling", 9.5),
        ("Customer Service", H, 78.0, "AI system management, Emotional intelligence, Complex problem solving", 8.7),
        ("Marketing", H, 81.0, "AI content creation, Data-driven strategy, Creative collaboration", 8.4),
        ("Finance & Accounting", H, 76.0, "AI-assisted analysis, Strategic thinking, Risk assessment", 8.6),
        ("Human Resources", M, 65.0, "AI ethics, Change management, Human-AI collaboration", 8.1),
        ("Sales", M, 58.0, "AI-powered insights, Relationship building, Consultative selling", 7.8),
        ("Operations", M, 62.0, "AI process optimization, Strategic planning, Cross-functional coordination", 7.9),
        ("Legal Services", M, 69.0, "AI compliance, Regulatory expertise, Technology law", 8.2),
        ("Healthcare", M, 54.0, "AI-assisted diagnosis, Patient interaction, Clinical judgment", 7.6),
        ("Education", M, 61.0, "AI-enhanced teaching, Curriculum design, Student mentoring", 8.0),
        ("Manufacturing", L, 45.0, "AI maintenance, Technical troubleshooting, Quality assurance", 7.3),
        ("Creative Industries", H, 83.0, "AI collaboration, Original thinking, Brand strategy", 8.5),
        ("Research & Development", V, 89.0, "AI research tools, Innovation management, Cross-disciplinary thinking", 9.1),
        ("Management", L, 38.0, "AI strategy, Leadership, Change management", 7.4),
    ];

    rows.iter()
        .map(|&(category, exposure, transformation, skills, priority)| WorkforceImpact {
            job_category: category.to_string(),
            ai_exposure_level: exposure,
            job_transformation: transformation,
            skill_demand_change: list(skills),
            reskilling_priority: priority,
        })
        .collect()
}

pub fn market_facts() -> MarketFacts {
    MarketFacts {
        global_market_size_2024_billion: 638.23,
        global_market_size_2030_billion: 3680.47,
        cagr_2025_2030: 19.20,
        enterprise_adoption_rate: 83.0,
        ai_workers_2025_million: 97.0,
        wearable_ai_market_2025_billion: 180.0,
    }
}

pub fn research_sources() -> ResearchSources {
    let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    ResearchSources {
        primary_sources: owned(&[
            "McKinsey Global AI Survey 2025",
            "Deloitte Global Predictions 2025",
            "PwC Global AI Jobs Barometer 2025",
            "Gartner AI Market Analysis 2025",
            "EU AI Act Implementation Reports 2025",
            "Stanford AI Index Report 2025",
            "MIT Technology Review AI Analysis 2025",
        ]),
        market_research: owned(&[
            "Grand View Research AI Market Report",
            "Fortune Business Insights AI Analysis",
            "Research and Markets Global AI Forecast",
            "IDC AI Spending Guide 2025",
            "Forrester AI Predictions 2025",
        ]),
        industry_reports: owned(&[
            "World Economic Forum Future of Jobs 2025",
            "OECD AI Employment Impact Study",
            "Brookings AI Policy Analysis",
            "Harvard Business Review AI Strategy Reports",
            "Accenture AI Transformation Studies",
        ]),
        last_updated: DATA_VINTAGE.to_string(),
        methodology: "Comprehensive analysis of 50+ research reports, surveys of 10,000+ enterprises, and expert interviews with industry leaders.".to_string(),
    }
}

/// Freshness metadata relative to `now`
pub fn data_freshness(now: DateTime<Utc>) -> DataFreshness {
    DataFreshness {
        last_update: now,
        data_vintage: DATA_VINTAGE.to_string(),
        next_update: now + Duration::days(UPDATE_INTERVAL_DAYS),
        confidence_level: "95%".to_string(),
        sample_size: "10,000+ enterprises globally".to_string(),
    }
}

/// A dated point of a market-size series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyValue {
    pub year: i32,
    pub value: f64,
}

/// Global market size compounded yearly at the published CAGR from the 2024 base.
///
/// Returns an empty series when `to_year < from_year`.
pub fn market_growth_series(market: &MarketFacts, from_year: i32, to_year: i32) -> Vec<YearlyValue> {
    const BASE_YEAR: i32 = 2024;
    let growth = 1.0 + market.cagr_2025_2030 / 100.0;

    (from_year..=to_year)
        .map(|year| YearlyValue {
            year,
            value: market.global_market_size_2024_billion * growth.powi(year - BASE_YEAR),
        })
        .collect()
}

/// Default forecasting window: the 2024 base through the current year (at least 2025)
pub fn default_growth_window(now: DateTime<Utc>) -> (i32, i32) {
    (2024, now.year().max(2025))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_sizes() {
        let catalog = Catalog::comprehensive();
        assert_eq!(catalog.trends.len(), 20);
        assert_eq!(catalog.opportunities.len(), 15);
        assert_eq!(catalog.regions.len(), 10);
        assert_eq!(catalog.industries.len(), 15);
        assert_eq!(catalog.workforce.len(), 15);
        assert_eq!(catalog.sources.primary_sources.len(), 7);
    }

    #[test]
    fn test_identities_unique() {
        let catalog = Catalog::comprehensive();
        let names: HashSet<_> = catalog.trends.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names.len(), catalog.trends.len());
        let areas: HashSet<_> = catalog.opportunities.iter().map(|o| o.area.as_str()).collect();
        assert_eq!(areas.len(), catalog.opportunities.len());
    }

    #[test]
    fn test_scores_within_ranges() {
        let catalog = Catalog::comprehensive();
        for t in &catalog.trends {
            assert!((0.0..=10.0).contains(&t.impact_score), "{}", t.name);
            assert!((0.0..=100.0).contains(&t.adoption_rate), "{}", t.name);
            assert!(t.market_size_billion >= 0.0);
        }
        for o in &catalog.opportunities {
            assert!((0.0..=10.0).contains(&o.investment_focus_score), "{}", o.area);
            assert!(o.market_size_lower_bound_billion >= 0.0);
        }
    }

    #[test]
    fn test_opportunity_labels() {
        let catalog = Catalog::comprehensive();
        let agentic = catalog.opportunity("Agentic AI Platforms & Solutions").unwrap();
        assert_eq!(agentic.market_size_label(), "Large ($285B+)");
        let governance = catalog
            .opportunity("AI Governance & Compliance Services")
            .unwrap();
        assert_eq!(governance.market_size_label(), "Medium ($89B+)");
        assert_eq!(governance.related_trends.len(), 2);
    }

    #[test]
    fn test_related_trends_skip_unknown_names() {
        let catalog = Catalog::comprehensive();
        let opp = catalog.opportunity("Edge AI Computing Solutions").unwrap();
        let related = catalog.related_trends(opp);
        let names: Vec<_> = related.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Edge AI Computing", "Real-time AI Decision Making"]);

        // "Enterprise AI Agents" is a loose reference with no exact catalogue entry
        let agentic = catalog.opportunity("Agentic AI Platforms & Solutions").unwrap();
        assert_eq!(catalog.related_trends(agentic).len(), 1);
    }

    #[test]
    fn test_market_growth_series() {
        let market = market_facts();
        let series = market_growth_series(&market, 2024, 2026);
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].year, 2024);
        assert!((series[0].value - 638.23).abs() < 1e-9);
        assert!((series[1].value - 638.23 * 1.192).abs() < 1e-9);
        assert!(market_growth_series(&market, 2026, 2024).is_empty());
    }

    #[test]
    fn test_data_freshness() {
        let now = Utc::now();
        let freshness = data_freshness(now);
        assert_eq!(freshness.data_vintage, "June 2025");
        assert_eq!(freshness.next_update - freshness.last_update, Duration::days(30));
    }
}
