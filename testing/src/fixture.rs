//! JSON bodies as served by the API.

pub static MODULES: &str = r#"[{
    "id": 1,
    "nomMod": "Algebra",
    "descriptionMod": "Groups, rings and fields",
    "anneeMod": "2023",
    "image_path": "modules/algebra.png",
    "created_at": "2024-01-05T10:00:00.000000Z"
}, {
    "id": 2,
    "nomMod": "Algorithms",
    "descriptionMod": "Sorting and searching",
    "anneeMod": "2024",
    "image_path": null,
    "created_at": null
}]"#;

pub static MODULES_FRENCH: &str = r#"[{
    "id": 10,
    "nomMod": "Réseaux",
    "descriptionMod": "Protocoles et routage",
    "anneeMod": "2ème Année"
}, {
    "id": 11,
    "nomMod": "Bases de données",
    "descriptionMod": "SQL et modélisation",
    "anneeMod": "1ère Année"
}, {
    "id": 12,
    "nomMod": "Algorithmique",
    "descriptionMod": "Structures de données",
    "anneeMod": "1ère Année"
}, {
    "id": 13,
    "nomMod": "électronique",
    "descriptionMod": null,
    "anneeMod": "3ème Année"
}]"#;

pub static EXAMS_PAGE_1: &str = r#"{
    "current_page": 1,
    "data": [{
        "id": 21,
        "title": "EFM Réseaux",
        "year": 2024,
        "module_id": 10,
        "module": { "id": 10, "nomMod": "Réseaux" },
        "duration": 120,
        "difficulty_level": "moyen",
        "status": "active",
        "image_path": "exams/21.png",
        "path": "exams/21.pdf",
        "created_at": "2024-06-01 08:30:00"
    }, {
        "id": 22,
        "title": null,
        "year": "2023",
        "module_id": 11,
        "module": null,
        "status": "draft"
    }],
    "last_page": 3,
    "per_page": 2,
    "total": 6
}"#;

pub static EXAMS_PAGE_2: &str = r#"{
    "current_page": 2,
    "data": [{
        "id": 23,
        "title": "EFM Bases de données",
        "year": 2024,
        "module_id": 11,
        "status": "archived"
    }],
    "last_page": 3
}"#;

pub static TRANSLATIONS_FR: &str = r#"{
    "search.placeholder": "Recherchez un module...",
    "filter.all_years": "Toutes les années"
}"#;
