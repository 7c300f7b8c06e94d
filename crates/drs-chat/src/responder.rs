//! 关键词应答器
//!
//! 小写化输入后按固定顺序扫描关键词表，首个命中的类别生效；
//! 同类别内的多条话术随机挑选，无命中（含空输入）落到默认类别

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 应答类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseCategory {
    Greeting,
    Symptoms,
    Stages,
    Prevention,
    Treatment,
    Screening,
    RiskFactors,
    Default,
}

/// 无话术可选时的兜底回复
const FALLBACK_RESPONSE: &str =
    "I specialize in diabetic retinopathy. Could you ask about symptoms, stages, prevention, treatment, or screening?";

/// 关键词应答器
#[derive(Debug, Clone)]
pub struct ChatResponder {
    keywords: Vec<(&'static str, ResponseCategory)>,
    responses: HashMap<ResponseCategory, Vec<&'static str>>,
}

impl ChatResponder {
    /// 创建新的应答器实例
    pub fn new() -> Self {
        // 关键词表，顺序即扫描顺序
        let keywords = vec![
            ("hello", ResponseCategory::Greeting),
            ("hi", ResponseCategory::Greeting),
            ("hey", ResponseCategory::Greeting),
            ("symptom", ResponseCategory::Symptoms),
            ("vision", ResponseCategory::Symptoms),
            ("blur", ResponseCategory::Symptoms),
            ("stage", ResponseCategory::Stages),
            ("level", ResponseCategory::Stages),
            ("grade", ResponseCategory::Stages),
            ("prevent", ResponseCategory::Prevention),
            ("avoid", ResponseCategory::Prevention),
            ("stop", ResponseCategory::Prevention),
            ("treat", ResponseCategory::Treatment),
            ("cure", ResponseCategory::Treatment),
            ("therapy", ResponseCategory::Treatment),
            ("screen", ResponseCategory::Screening),
            ("test", ResponseCategory::Screening),
            ("exam", ResponseCategory::Screening),
            ("risk", ResponseCategory::RiskFactors),
            ("factor", ResponseCategory::RiskFactors),
            ("cause", ResponseCategory::RiskFactors),
        ];

        let mut responses = HashMap::new();

        responses.insert(
            ResponseCategory::Greeting,
            vec![
                "Hello! I'm your Diabetic Retinopathy AI Assistant. How can I help you today? 👁️",
                "Hi there! I'm here to assist with diabetic retinopathy questions. What would you like to know? 🩺",
                "Welcome! I'm your AI consultant for diabetic retinopathy screening and information. How can I assist? 🔍",
            ],
        );

        responses.insert(
            ResponseCategory::Symptoms,
            vec![
                "Common symptoms include blurred vision, floaters, dark areas in vision, difficulty perceiving colors, and vision loss.",
                "Watch for: blurred vision, spots or dark strings floating, vision fluctuations, impaired color vision, and dark spots.",
                "Symptoms progress from mild (microaneurysms) to severe (neovascularization). Early stages often show no symptoms.",
            ],
        );

        responses.insert(
            ResponseCategory::Stages,
            vec![
                "Diabetic retinopathy has 4 stages: 1) Mild NPDR, 2) Moderate NPDR, 3) Severe NPDR, 4) Proliferative DR.",
                "Stages progress from mild non-proliferative to proliferative DR. Early detection at mild stage is crucial.",
                "The stages are: No DR → Mild → Moderate → Severe NPDR → Proliferative DR with increasing vision risk.",
            ],
        );

        responses.insert(
            ResponseCategory::Prevention,
            vec![
                "Control blood sugar, maintain healthy BP/cholesterol, regular eye exams, quit smoking, and exercise regularly.",
                "Key prevention: Annual eye exams, HbA1c <7%, BP <130/80, healthy diet, and no smoking.",
                "Prevent progression with: Regular screening, glucose control, blood pressure management, and lifestyle changes.",
            ],
        );

        responses.insert(
            ResponseCategory::Treatment,
            vec![
                "Treatments include laser surgery, anti-VEGF injections, vitrectomy, and corticosteroids based on severity.",
                "Options: Laser photocoagulation, intravitreal injections, vitrectomy surgery, and proper diabetes management.",
                "Treatment depends on stage: Mild - monitoring; Moderate - laser; Severe - injections/surgery.",
            ],
        );

        responses.insert(
            ResponseCategory::Screening,
            vec![
                "Diabetics should have annual eye exams. More frequent if DR detected. Use AI screening for early detection.",
                "Screen annually for Type 2 diabetes, 5 years after diagnosis for Type 1, and more often if retinopathy present.",
                "Regular screening includes: Visual acuity test, dilated eye exam, tonometry, and retinal imaging.",
            ],
        );

        responses.insert(
            ResponseCategory::RiskFactors,
            vec![
                "Risk factors: Diabetes duration, poor glucose control, high blood pressure, high cholesterol, pregnancy, smoking.",
                "Higher risk with: Long diabetes history, high HbA1c, hypertension, nephropathy, and tobacco use.",
                "Key risks: Duration of diabetes, blood sugar levels, blood pressure, cholesterol, and genetic factors.",
            ],
        );

        responses.insert(
            ResponseCategory::Default,
            vec![
                "I specialize in diabetic retinopathy. Could you ask about symptoms, stages, prevention, treatment, or screening?",
                "I'm here to help with diabetic retinopathy questions. Try asking about stages, symptoms, or prevention methods.",
                "As a DR specialist, I can discuss screening, symptoms, treatments, or risk factors. What interests you?",
            ],
        );

        Self {
            keywords,
            responses,
        }
    }

    /// 判定输入归属的应答类别
    pub fn category_for(&self, input: &str) -> ResponseCategory {
        let lowered = input.to_lowercase();

        for (keyword, category) in &self.keywords {
            if lowered.contains(keyword) {
                return *category;
            }
        }

        ResponseCategory::Default
    }

    /// 生成一条回复
    pub fn respond(&self, input: &str, rng: &mut impl Rng) -> String {
        let category = self.category_for(input);
        self.pick(category, rng)
    }

    /// 随机挑选一条问候语（会话开场用）
    pub fn greeting(&self, rng: &mut impl Rng) -> String {
        self.pick(ResponseCategory::Greeting, rng)
    }

    /// 某一类别的全部话术
    pub fn canned_responses(&self, category: ResponseCategory) -> &[&'static str] {
        self.responses
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 推荐提问列表（空会话的引导问题）
    pub fn suggested_questions() -> &'static [&'static str] {
        &[
            "What are the early symptoms of diabetic retinopathy?",
            "How often should I get screened for DR?",
            "What are the different stages of diabetic retinopathy?",
            "How can I prevent diabetic retinopathy?",
            "What treatments are available for severe DR?",
            "What are the main risk factors for developing DR?",
        ]
    }

    fn pick(&self, category: ResponseCategory, rng: &mut impl Rng) -> String {
        self.canned_responses(category)
            .choose(rng)
            .map(|s| s.to_string())
            .unwrap_or_else(|| FALLBACK_RESPONSE.to_string())
    }
}

impl Default for ChatResponder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_hello_always_greets() {
        let responder = ChatResponder::new();
        let greetings = responder.canned_responses(ResponseCategory::Greeting);
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..30 {
            let reply = responder.respond("Hello, how are you?", &mut rng);
            assert!(greetings.contains(&reply.as_str()));
        }
    }

    #[test]
    fn test_gibberish_gets_default() {
        let responder = ChatResponder::new();
        let defaults = responder.canned_responses(ResponseCategory::Default);
        let mut rng = StdRng::seed_from_u64(2);

        for _ in 0..30 {
            let reply = responder.respond("asdasd", &mut rng);
            assert!(defaults.contains(&reply.as_str()));
        }
    }

    #[test]
    fn test_empty_and_whitespace_get_default() {
        let responder = ChatResponder::new();
        assert_eq!(responder.category_for(""), ResponseCategory::Default);
        assert_eq!(responder.category_for("   \t  "), ResponseCategory::Default);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let responder = ChatResponder::new();
        assert_eq!(
            responder.category_for("WHAT TREATMENT IS AVAILABLE?"),
            ResponseCategory::Treatment
        );
    }

    #[test]
    fn test_first_match_wins_over_table_order() {
        let responder = ChatResponder::new();
        // 同时包含 greeting 与 treatment 关键词时，表内靠前的 greeting 生效
        assert_eq!(
            responder.category_for("hello, tell me about treatment"),
            ResponseCategory::Greeting
        );
        // symptom 在 stage 之前
        assert_eq!(
            responder.category_for("symptom of late stage?"),
            ResponseCategory::Symptoms
        );
        // 子串匹配：包含 "hi" 的单词也会命中 greeting
        assert_eq!(
            responder.category_for("which stage is worst?"),
            ResponseCategory::Greeting
        );
    }

    #[test]
    fn test_each_keyword_group_routes() {
        let responder = ChatResponder::new();
        let cases = [
            ("my vision got worse", ResponseCategory::Symptoms),
            ("worst grade of dr", ResponseCategory::Stages),
            ("can i avoid it", ResponseCategory::Prevention),
            ("is there a cure", ResponseCategory::Treatment),
            ("when to take the exam", ResponseCategory::Screening),
            ("main cause of dr", ResponseCategory::RiskFactors),
        ];

        for (input, expected) in cases {
            assert_eq!(responder.category_for(input), expected, "input: {input}");
        }
    }

    #[test]
    fn test_every_category_has_at_least_three_responses() {
        let responder = ChatResponder::new();
        let categories = [
            ResponseCategory::Greeting,
            ResponseCategory::Symptoms,
            ResponseCategory::Stages,
            ResponseCategory::Prevention,
            ResponseCategory::Treatment,
            ResponseCategory::Screening,
            ResponseCategory::RiskFactors,
            ResponseCategory::Default,
        ];

        for category in categories {
            assert!(responder.canned_responses(category).len() >= 3);
        }
    }

    #[test]
    fn test_suggested_questions() {
        assert_eq!(ChatResponder::suggested_questions().len(), 6);
    }
}
