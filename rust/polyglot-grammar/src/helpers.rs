//! Sample grammar data for tests and demos.
//!
//! Five languages covering all three word orders (English and Spanish SVO,
//! Japanese and Korean SOV, Arabic VSO) and a handful of commands with
//! required, optional, defaulted and overridden roles.

use crate::catalog::GrammarCatalog;
use crate::error::GrammarError;
use crate::keyword::{KeywordForm, KeywordTranslation};
use crate::marker::RoleMarker;
use crate::normalize::Normalization;
use crate::profile::{EventHandlerSyntax, LanguageProfile, WordOrder};
use crate::role::SemanticRole;
use crate::schema::{CommandSchema, RoleSpec};
use crate::value::{RoleValue, ValueKind};

fn keywords(
    builder: crate::profile::LanguageProfileBuilder,
    entries: &[(&str, &[&str])],
) -> crate::profile::LanguageProfileBuilder {
    entries.iter().fold(builder, |builder, (action, spellings)| {
        let mut spellings = spellings.iter();
        let Some(primary) = spellings.next() else {
            return builder;
        };
        let translation = spellings.fold(KeywordTranslation::new(*primary), |keyword, alt| {
            keyword.with_alternative(*alt)
        });
        builder.keyword(*action, translation)
    })
}

pub fn english() -> LanguageProfile {
    let builder = LanguageProfile::builder("en", WordOrder::Svo)
        .name("English")
        .normalization(Normalization::Lowercase)
        .role_marker(
            SemanticRole::Destination,
            RoleMarker::before("to").with_alternative("into"),
        )
        .role_marker(SemanticRole::Source, RoleMarker::before("from"))
        .role_marker(SemanticRole::Style, RoleMarker::before("with"))
        .role_marker(SemanticRole::Quantity, RoleMarker::before("by"))
        .event_handler(EventHandlerSyntax::new(RoleMarker::before("on")));
    keywords(
        builder,
        &[
            ("toggle", &["toggle"]),
            ("add", &["add"]),
            ("remove", &["remove"]),
            ("show", &["show"]),
            ("hide", &["hide"]),
            ("put", &["put"]),
            ("set", &["set"]),
            ("wait", &["wait"]),
            ("increment", &["increment"]),
        ],
    )
    .build()
}

pub fn spanish() -> LanguageProfile {
    let builder = LanguageProfile::builder("es", WordOrder::Svo)
        .name("Español")
        .normalization(Normalization::Lowercase)
        .role_marker(
            SemanticRole::Destination,
            RoleMarker::before("en").with_alternative("a"),
        )
        .role_marker(SemanticRole::Source, RoleMarker::before("de"))
        .role_marker(SemanticRole::Style, RoleMarker::before("con"))
        .role_marker(SemanticRole::Quantity, RoleMarker::before("por"))
        .event_handler(EventHandlerSyntax::new(RoleMarker::before("al")));
    keywords(
        builder,
        &[
            ("toggle", &["alternar"]),
            ("add", &["añadir", "agregar"]),
            ("remove", &["quitar", "eliminar"]),
            ("show", &["mostrar"]),
            ("hide", &["ocultar"]),
            ("put", &["poner", "pon"]),
            ("set", &["establecer", "fijar"]),
            ("wait", &["esperar"]),
        ],
    )
    .build()
}

pub fn japanese() -> LanguageProfile {
    let builder = LanguageProfile::builder("ja", WordOrder::Sov)
        .name("日本語")
        .role_marker(SemanticRole::Patient, RoleMarker::after("を"))
        .role_marker(
            SemanticRole::Destination,
            RoleMarker::after("に").with_alternative("へ"),
        )
        .role_marker(SemanticRole::Source, RoleMarker::after("から"))
        .role_marker(SemanticRole::Quantity, RoleMarker::after("だけ"))
        .event_handler(
            EventHandlerSyntax::new(RoleMarker::after("で"))
                .with_temporal_marker("時")
                .with_temporal_marker("とき")
                .with_possessive("の"),
        );
    keywords(
        builder,
        &[
            ("toggle", &["切り替え", "トグル"]),
            ("add", &["追加"]),
            ("remove", &["削除"]),
            ("show", &["表示"]),
            ("hide", &["隠す"]),
            ("put", &["置く"]),
            ("set", &["設定"]),
            ("wait", &["待つ"]),
            ("increment", &["増やす"]),
        ],
    )
    .build()
}

pub fn korean() -> LanguageProfile {
    let builder = LanguageProfile::builder("ko", WordOrder::Sov)
        .name("한국어")
        .role_marker(
            SemanticRole::Patient,
            RoleMarker::after("를").with_alternative("을"),
        )
        .role_marker(
            SemanticRole::Destination,
            RoleMarker::after("에").with_alternative("에게"),
        )
        .role_marker(SemanticRole::Source, RoleMarker::after("에서"))
        .event_handler(EventHandlerSyntax::new(
            RoleMarker::after("할 때").with_alternative("할때"),
        ));
    keywords(
        builder,
        &[
            ("toggle", &["토글"]),
            ("add", &["추가"]),
            ("remove", &["제거"]),
            ("show", &["표시"]),
            ("hide", &["숨기기"]),
            ("put", &["넣기"]),
            ("set", &["설정"]),
            ("wait", &["대기"]),
        ],
    )
    .build()
}

pub fn arabic() -> LanguageProfile {
    let builder = LanguageProfile::builder("ar", WordOrder::Vso)
        .name("العربية")
        .role_marker(
            SemanticRole::Destination,
            RoleMarker::before("في").with_alternative("إلى"),
        )
        .role_marker(SemanticRole::Source, RoleMarker::before("من"))
        .event_handler(
            EventHandlerSyntax::new(RoleMarker::before("عند").with_alternative("لدى"))
                .with_negation(RoleMarker::before("عدم")),
        )
        .prefix("و")
        .prefix("ف");
    let profile = keywords(
        builder,
        &[
            ("toggle", &["بدّل", "بدل"]),
            ("add", &["أضف"]),
            ("remove", &["أزل"]),
            ("show", &["أظهر"]),
            ("hide", &["أخف"]),
            ("put", &["ضع"]),
            ("set", &["عيّن"]),
            ("wait", &["انتظر"]),
        ],
    )
    .build();
    mark_imperative(profile)
}

fn mark_imperative(mut profile: LanguageProfile) -> LanguageProfile {
    for keyword in profile.keywords.values_mut() {
        keyword.form = Some(KeywordForm::Imperative);
    }
    profile
}

pub fn sample_profiles() -> Vec<LanguageProfile> {
    vec![english(), spanish(), japanese(), korean(), arabic()]
}

fn current_element() -> RoleValue {
    RoleValue::reference("me")
}

pub fn toggle() -> CommandSchema {
    CommandSchema::builder("toggle")
        .description("Toggle a class or attribute")
        .patient()
        .role(
            RoleSpec::optional(SemanticRole::Destination)
                .svo_position(2)
                .sov_position(2)
                .marker_override("en", "on")
                .default_value(current_element())
                .expects(ValueKind::Selector)
                .expects(ValueKind::Reference),
        )
        .build()
}

pub fn add() -> CommandSchema {
    CommandSchema::builder("add")
        .description("Add a class or attribute")
        .patient()
        .role(
            RoleSpec::optional(SemanticRole::Destination)
                .svo_position(2)
                .sov_position(2)
                .default_value(current_element()),
        )
        .build()
}

pub fn remove() -> CommandSchema {
    CommandSchema::builder("remove")
        .description("Remove a class, attribute or element")
        .patient()
        .role(
            RoleSpec::optional(SemanticRole::Source)
                .svo_position(2)
                .sov_position(2)
                .default_value(current_element()),
        )
        .build()
}

pub fn show() -> CommandSchema {
    CommandSchema::builder("show")
        .description("Show an element")
        .role(
            RoleSpec::optional(SemanticRole::Patient)
                .svo_position(1)
                .sov_position(1)
                .default_value(current_element()),
        )
        .role(RoleSpec::optional(SemanticRole::Style).svo_position(2).sov_position(2))
        .build()
}

pub fn hide() -> CommandSchema {
    CommandSchema::builder("hide")
        .description("Hide an element")
        .role(
            RoleSpec::optional(SemanticRole::Patient)
                .svo_position(1)
                .sov_position(1)
                .default_value(current_element()),
        )
        .build()
}

pub fn put() -> CommandSchema {
    CommandSchema::builder("put")
        .description("Insert content into an element")
        .patient()
        .role(
            RoleSpec::required(SemanticRole::Destination)
                .svo_position(2)
                .sov_position(2)
                .marker_override("en", "into"),
        )
        .build()
}

pub fn set() -> CommandSchema {
    CommandSchema::builder("set")
        .description("Assign a value to a variable or property")
        .role(
            RoleSpec::required(SemanticRole::Destination)
                .svo_position(1)
                .sov_position(1)
                .marker_override("en", "")
                .marker_override("es", ""),
        )
        .role(
            RoleSpec::required(SemanticRole::Patient)
                .svo_position(2)
                .sov_position(2)
                .marker_override("en", "to")
                .marker_override("es", "a"),
        )
        .build()
}

pub fn wait() -> CommandSchema {
    CommandSchema::builder("wait")
        .description("Pause for a duration")
        .role(
            RoleSpec::required(SemanticRole::Duration)
                .svo_position(1)
                .sov_position(1)
                .expects(ValueKind::Duration)
                .expects(ValueKind::Number),
        )
        .build()
}

pub fn increment() -> CommandSchema {
    CommandSchema::builder("increment")
        .description("Increase a numeric value")
        .patient()
        .role(
            RoleSpec::optional(SemanticRole::Quantity)
                .svo_position(2)
                .sov_position(2)
                .expects(ValueKind::Number)
                .default_value(RoleValue::new(ValueKind::Number, "1")),
        )
        .build()
}

pub fn sample_schemas() -> Vec<CommandSchema> {
    vec![
        toggle(),
        add(),
        remove(),
        show(),
        hide(),
        put(),
        set(),
        wait(),
        increment(),
    ]
}

/// A validated catalog holding every sample profile and schema.
pub fn sample_catalog() -> Result<GrammarCatalog, GrammarError> {
    let mut catalog = GrammarCatalog::new();
    for profile in sample_profiles() {
        catalog.register_profile(profile)?;
    }
    for schema in sample_schemas() {
        catalog.register_schema(schema)?;
    }
    catalog.validate()?;
    Ok(catalog)
}
