use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Built-in English to Japanese dictionary for common recipe vocabulary.
///
/// Covers the ingredient names, seasonings, cooking verbs and dish words
/// that dominate recipe titles, so short phrases localize without
/// spending translation budget.
static ENTRIES: &[(&str, &str)] = &[
    // Vegetables
    ("cabbage", "キャベツ"),
    ("napa cabbage", "白菜"),
    ("chinese cabbage", "白菜"),
    ("onion", "玉ねぎ"),
    ("green onion", "ねぎ"),
    ("scallion", "ねぎ"),
    ("garlic", "にんにく"),
    ("ginger", "生姜"),
    ("carrot", "にんじん"),
    ("potato", "じゃがいも"),
    ("sweet potato", "さつまいも"),
    ("daikon", "大根"),
    ("cucumber", "きゅうり"),
    ("eggplant", "なす"),
    ("spinach", "ほうれん草"),
    ("mushroom", "きのこ"),
    ("shiitake", "しいたけ"),
    ("tomato", "トマト"),
    ("lettuce", "レタス"),
    ("broccoli", "ブロッコリー"),
    ("celery", "セロリ"),
    ("zucchini", "ズッキーニ"),
    ("pumpkin", "かぼちゃ"),
    ("turnip", "かぶ"),
    ("bean sprouts", "もやし"),
    ("bell pepper", "ピーマン"),
    ("chili", "唐辛子"),
    ("corn", "とうもろこし"),
    ("cilantro", "パクチー"),
    ("basil", "バジル"),
    // Proteins
    ("chicken", "鶏肉"),
    ("chicken breast", "鶏むね肉"),
    ("chicken thigh", "鶏もも肉"),
    ("pork", "豚肉"),
    ("pork belly", "豚バラ肉"),
    ("beef", "牛肉"),
    ("ground beef", "牛ひき肉"),
    ("bacon", "ベーコン"),
    ("ham", "ハム"),
    ("sausage", "ソーセージ"),
    ("egg", "卵"),
    ("eggs", "卵"),
    ("tofu", "豆腐"),
    ("fish", "魚"),
    ("salmon", "鮭"),
    ("tuna", "まぐろ"),
    ("shrimp", "えび"),
    ("squid", "いか"),
    // Dairy and staples
    ("milk", "牛乳"),
    ("cheese", "チーズ"),
    ("butter", "バター"),
    ("cream", "生クリーム"),
    ("yogurt", "ヨーグルト"),
    ("rice", "ご飯"),
    ("noodles", "麺"),
    ("noodle", "麺"),
    ("ramen", "ラーメン"),
    ("pasta", "パスタ"),
    ("bread", "パン"),
    ("flour", "小麦粉"),
    ("seaweed", "海苔"),
    ("kimchi", "キムチ"),
    // Seasonings
    ("soy sauce", "醤油"),
    ("miso", "味噌"),
    ("salt", "塩"),
    ("pepper", "こしょう"),
    ("sugar", "砂糖"),
    ("vinegar", "酢"),
    ("oil", "油"),
    ("sesame oil", "ごま油"),
    ("olive oil", "オリーブオイル"),
    ("sesame", "ごま"),
    ("honey", "はちみつ"),
    ("lemon", "レモン"),
    ("water", "水"),
    ("stock", "だし"),
    ("broth", "だし汁"),
    // Dish words
    ("stir-fry", "炒め物"),
    ("stir fry", "炒め物"),
    ("soup", "スープ"),
    ("salad", "サラダ"),
    ("stew", "シチュー"),
    ("curry", "カレー"),
    ("sauce", "ソース"),
    ("hot pot", "鍋"),
    ("dumpling", "餃子"),
    ("dumplings", "餃子"),
    // Preparation styles
    ("stir-fried", "炒め"),
    ("fried", "揚げ"),
    ("deep-fried", "揚げ"),
    ("grilled", "焼き"),
    ("baked", "オーブン焼き"),
    ("steamed", "蒸し"),
    ("simmered", "煮込み"),
    ("braised", "煮込み"),
    ("boiled", "茹で"),
    ("roasted", "ロースト"),
    ("sauteed", "ソテー"),
    ("marinated", "漬け込み"),
    ("chopped", "刻んだ"),
    ("sliced", "スライスした"),
    ("minced", "みじん切りの"),
    // Instruction verbs
    ("chop", "刻む"),
    ("slice", "スライスする"),
    ("mince", "みじん切りにする"),
    ("dice", "さいの目に切る"),
    ("mix", "混ぜる"),
    ("combine", "合わせる"),
    ("add", "加える"),
    ("heat", "熱する"),
    ("cook", "調理する"),
    ("serve", "盛り付ける"),
    ("season", "味付けする"),
    ("garnish", "飾る"),
    ("drain", "水気を切る"),
    ("rinse", "洗う"),
    ("peel", "皮をむく"),
    ("cut", "切る"),
    ("stir", "かき混ぜる"),
    ("simmer", "煮る"),
    ("boil", "茹でる"),
    ("bake", "焼く"),
    ("fry", "炒める"),
    // Descriptors and connectives
    ("easy", "簡単"),
    ("quick", "時短"),
    ("simple", "シンプル"),
    ("homemade", "手作り"),
    ("spicy", "ピリ辛"),
    ("creamy", "クリーミー"),
    ("crispy", "カリカリ"),
    ("fresh", "新鮮"),
    ("healthy", "ヘルシー"),
    ("classic", "定番"),
    ("traditional", "伝統的"),
    ("style", "風"),
    ("with", "と"),
    ("and", "と"),
    ("minutes", "分"),
    ("minute", "分"),
    // Cookware
    ("pan", "フライパン"),
    ("pot", "鍋"),
    ("wok", "中華鍋"),
    ("oven", "オーブン"),
    ("medium heat", "中火"),
    ("high heat", "強火"),
    ("low heat", "弱火"),
];

static INDEX: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| ENTRIES.iter().copied().collect());

/// Look up an exact phrase. Case and surrounding whitespace insensitive.
pub fn lookup(phrase: &str) -> Option<&'static str> {
    let key = phrase.trim().to_lowercase();
    INDEX.get(key.as_str()).copied()
}

/// Best effort word-by-word substitution for text the dictionary
/// cannot match as a whole. Two-word phrases are tried before single
/// words so "soy sauce" does not degrade into "soy ソース". Unknown
/// words pass through unchanged.
pub fn substitute(text: &str) -> String {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let mut output: Vec<String> = Vec::with_capacity(tokens.len());

    let mut i = 0;
    while i < tokens.len() {
        if i + 1 < tokens.len() {
            let (first, prefix, _) = split_punctuation(tokens[i]);
            let (second, _, suffix) = split_punctuation(tokens[i + 1]);
            let pair = format!("{} {}", first, second);
            if let Some(localized) = lookup(&pair) {
                output.push(format!("{}{}{}", prefix, localized, suffix));
                i += 2;
                continue;
            }
        }

        let (word, prefix, suffix) = split_punctuation(tokens[i]);
        match lookup(word) {
            Some(localized) => output.push(format!("{}{}{}", prefix, localized, suffix)),
            None => output.push(tokens[i].to_string()),
        }
        i += 1;
    }

    output.join(" ")
}

/// Split a token into (core, leading punctuation, trailing punctuation).
fn split_punctuation(token: &str) -> (&str, &str, &str) {
    let start = match token.find(|c: char| c.is_alphanumeric()) {
        Some(i) => i,
        None => return ("", token, ""),
    };
    let end = token
        .rfind(|c: char| c.is_alphanumeric())
        .map(|i| {
            let tail_char_len = token[i..].chars().next().map(char::len_utf8).unwrap_or(1);
            i + tail_char_len
        })
        .unwrap_or(start);
    (&token[start..end], &token[..start], &token[end..])
}
