use crate::core::models::circle::{Circle, CircleProduct};
use crate::core::models::ingredient::{Ingredient, IngredientCategory};
use crate::core::models::product::Product;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn ingredient(
    id: &str,
    name: &str,
    category: IngredientCategory,
    function: &str,
    description: &str,
    sensitivities: &[&str],
    conflicts: &[&str],
    compatible_with: &[&str],
) -> Ingredient {
    Ingredient {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category,
        function: function.to_string(),
        common_sensitivities: strings(sensitivities),
        conflicts: strings(conflicts),
        compatible_with: strings(compatible_with),
    }
}

fn product(
    id: &str,
    name: &str,
    brand: &str,
    function: &str,
    ingredients: &[&str],
    description: &str,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        brand: brand.to_string(),
        function: function.to_string(),
        ingredients: strings(ingredients),
        description: description.to_string(),
    }
}

pub(super) fn ingredients() -> Vec<Ingredient> {
    use IngredientCategory::*;
    vec![
        ingredient(
            "niacinamide",
            "Niacinamide",
            Active,
            "serum",
            "A form of vitamin B3 that helps reduce inflammation, minimize pores, and improve skin texture.",
            &["Some users may experience mild irritation or redness"],
            &["vitamin-c"],
            &["hyaluronic-acid", "peptides", "ceramides"],
        ),
        ingredient(
            "vitamin-c",
            "Vitamin C (L-Ascorbic Acid)",
            Active,
            "serum",
            "Powerful antioxidant that brightens skin, reduces hyperpigmentation, and protects against environmental damage.",
            &["Can cause irritation when mixed with certain acids"],
            &["niacinamide", "aha", "bha"],
            &["hyaluronic-acid", "peptides", "vitamin-e"],
        ),
        ingredient(
            "retinol",
            "Retinol",
            Active,
            "serum",
            "Vitamin A derivative that promotes cell turnover, reduces fine lines, and improves skin texture.",
            &["Can cause dryness, peeling, and sensitivity, especially when starting"],
            &["aha", "bha", "vitamin-c"],
            &["hyaluronic-acid", "ceramides", "peptides"],
        ),
        ingredient(
            "aha",
            "Alpha Hydroxy Acids (AHA)",
            Exfoliant,
            "exfoliant",
            "Chemical exfoliants like glycolic acid, lactic acid that remove dead skin cells.",
            &["Can cause irritation, especially for sensitive skin"],
            &["vitamin-c", "retinol", "bha"],
            &["hyaluronic-acid", "ceramides"],
        ),
        ingredient(
            "bha",
            "Beta Hydroxy Acid (BHA)",
            Exfoliant,
            "exfoliant",
            "Salicylic acid that penetrates pores to exfoliate and reduce acne.",
            &["Can cause dryness and irritation"],
            &["vitamin-c", "retinol", "aha"],
            &["hyaluronic-acid", "ceramides"],
        ),
        ingredient(
            "hyaluronic-acid",
            "Hyaluronic Acid",
            Hydrating,
            "serum",
            "Humectant that attracts and retains moisture in the skin.",
            &["Generally well-tolerated"],
            &[],
            &["niacinamide", "vitamin-c", "retinol", "peptides", "ceramides"],
        ),
        ingredient(
            "peptides",
            "Peptides",
            Active,
            "serum",
            "Amino acid chains that support collagen production and skin repair.",
            &["Generally well-tolerated"],
            &[],
            &["niacinamide", "vitamin-c", "hyaluronic-acid", "ceramides"],
        ),
        ingredient(
            "ceramides",
            "Ceramides",
            Barrier,
            "moisturizer",
            "Lipids that strengthen the skin barrier and prevent moisture loss.",
            &["Generally well-tolerated"],
            &[],
            &["niacinamide", "hyaluronic-acid", "peptides", "retinol"],
        ),
        ingredient(
            "vitamin-e",
            "Vitamin E",
            Active,
            "serum",
            "Antioxidant that works synergistically with vitamin C to protect skin.",
            &["Rare sensitivity"],
            &[],
            &["vitamin-c", "hyaluronic-acid"],
        ),
    ]
}

pub(super) fn products() -> Vec<Product> {
    vec![
        product(
            "product-1",
            "CeraVe Foaming Facial Cleanser",
            "CeraVe",
            "cleanser",
            &["hyaluronic-acid", "ceramides"],
            "Gentle foaming cleanser for normal to oily skin",
        ),
        product(
            "product-2",
            "The Ordinary Niacinamide 10% + Zinc 1%",
            "The Ordinary",
            "serum",
            &["niacinamide"],
            "High-strength niacinamide serum for blemish-prone skin",
        ),
        product(
            "product-3",
            "Celimax Noni Ampoule",
            "Celimax",
            "serum",
            &["hyaluronic-acid", "peptides"],
            "Korean skincare ampoule with noni extract",
        ),
        product(
            "product-4",
            "Vitamin C Brightening Serum",
            "Generic",
            "serum",
            &["vitamin-c", "vitamin-e"],
            "Brightening serum with vitamin C and E",
        ),
        product(
            "product-5",
            "Retinol Night Serum",
            "Generic",
            "serum",
            &["retinol", "hyaluronic-acid"],
            "Anti-aging retinol serum for nighttime use",
        ),
        product(
            "product-6",
            "AHA Exfoliating Toner",
            "Generic",
            "exfoliant",
            &["aha"],
            "Chemical exfoliant with alpha hydroxy acids",
        ),
        product(
            "product-7",
            "BHA Salicylic Acid Treatment",
            "Generic",
            "exfoliant",
            &["bha"],
            "Acne treatment with salicylic acid",
        ),
        product(
            "product-8",
            "Daily Moisturizer",
            "Generic",
            "moisturizer",
            &["ceramides", "hyaluronic-acid"],
            "Hydrating daily moisturizer",
        ),
    ]
}

pub(super) fn circles() -> Vec<Circle> {
    let top_product = |product_id: &str, upvotes: u32, reason: &str| CircleProduct {
        product_id: product_id.to_string(),
        upvotes,
        reason: reason.to_string(),
    };
    vec![
        Circle {
            id: "circle-1".to_string(),
            name: "Sensitive Skin Warriors".to_string(),
            description: "People with sensitive, reactive skin who share similar ingredient experiences".to_string(),
            match_percentage: 87,
            top_liked_ingredients: strings(&["ceramides", "hyaluronic-acid", "peptides"]),
            top_disliked_ingredients: strings(&["aha", "bha", "retinol"]),
            top_concerns: strings(&["irritation", "redness", "dryness"]),
            member_count: 1247,
            top_products: vec![
                top_product("product-1", 89, "Gentle, barrier-supporting ingredients"),
                top_product("product-3", 67, "Hydrating without irritation"),
            ],
        },
        Circle {
            id: "circle-2".to_string(),
            name: "Acne-Focused Routine Builders".to_string(),
            description: "Building routines to manage breakouts and prevent future acne".to_string(),
            match_percentage: 72,
            top_liked_ingredients: strings(&["niacinamide", "bha", "hyaluronic-acid"]),
            top_disliked_ingredients: strings(&["vitamin-c", "aha"]),
            top_concerns: strings(&["breakouts", "oiliness", "pores"]),
            member_count: 892,
            top_products: vec![top_product("product-2", 112, "Effective for blemish control")],
        },
        Circle {
            id: "circle-3".to_string(),
            name: "Anti-Aging Enthusiasts".to_string(),
            description: "Focused on fine lines, wrinkles, and maintaining youthful skin".to_string(),
            match_percentage: 65,
            top_liked_ingredients: strings(&["retinol", "peptides", "vitamin-c"]),
            top_disliked_ingredients: strings(&["bha"]),
            top_concerns: strings(&["fine-lines", "wrinkles", "firmness"]),
            member_count: 654,
            top_products: vec![],
        },
    ]
}
