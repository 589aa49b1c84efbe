//! Skill manifest (`skill.json`) wire types.
//!
//! The manifest is the deployment artifact describing publishing metadata,
//! API endpoints, permissions, and privacy declarations. Locale maps use
//! `BTreeMap` so the serialized artifact is stable across builds.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Manifest schema version accepted by the deployment API.
pub const MANIFEST_VERSION: &str = "1.0";

/// Distribution country codes.
pub mod country {
    pub const AUSTRALIA: &str = "AU";
    pub const CANADA: &str = "CA";
    pub const GERMANY: &str = "DE";
    pub const FRANCE: &str = "FR";
    pub const GREAT_BRITAIN: &str = "GB";
    pub const INDIA: &str = "IN";
    pub const ITALY: &str = "IT";
    pub const JAPAN: &str = "JP";
    pub const UNITED_STATES: &str = "US";
}

// ---------------------------------------------------------------------------
// Top-level structure
// ---------------------------------------------------------------------------

/// Top element of `skill.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub manifest: Manifest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(rename = "manifestVersion")]
    pub version: String,
    #[serde(rename = "publishingInformation")]
    pub publishing: PublishingInformation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apis: Option<Apis>,
    pub permissions: Vec<Permission>,
    #[serde(rename = "privacyAndCompliance")]
    pub privacy: PrivacyAndCompliance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishingInformation {
    pub locales: BTreeMap<String, PublishingLocale>,
    #[serde(rename = "isAvailableWorldwide")]
    pub worldwide: bool,
    pub category: Category,
    #[serde(
        rename = "distributionCountries",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub countries: Vec<String>,
    #[serde(rename = "testingInstructions")]
    pub testing_instructions: String,
}

/// Store listing texts for one locale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishingLocale {
    pub name: String,
    pub description: String,
    pub summary: String,
    #[serde(rename = "examplePhrases")]
    pub example_phrases: Vec<String>,
    pub keywords: Vec<String>,
    #[serde(rename = "smallIconUri")]
    pub small_icon_uri: String,
    #[serde(rename = "largeIconUri")]
    pub large_icon_uri: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    pub name: String,
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Store category used for filtering in the companion app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    AlarmsAndClocks,
    Astrology,
    BusinessAndFinance,
    Calculators,
    CalendarsAndReminders,
    ChildrensEducationAndReference,
    ChildrensGames,
    ChildrensMusicAndAudio,
    ChildrensNoveltyAndHumor,
    Communication,
    ConnectedCar,
    CookingAndRecipe,
    CurrencyGuidesAndConverters,
    Dating,
    DeliveryAndTakeout,
    DeviceTracking,
    EducationAndReference,
    EventFinders,
    ExerciseAndWorkout,
    FashionAndStyle,
    FlightFinders,
    FriendsAndFamily,
    GameInfoAndAccessory,
    Games,
    HealthAndFitness,
    HotelFinders,
    KnowledgeAndTrivia,
    MovieAndTvKnowledgeAndTrivia,
    MovieInfoAndReviews,
    MovieShowtimes,
    MusicAndAudioAccessories,
    MusicAndAudioKnowledgeAndTrivia,
    MusicInfoReviewsAndRecognitionService,
    NavigationAndTripPlanner,
    News,
    Novelty,
    OrganizersAndAssistants,
    PetsAndAnimal,
    Podcast,
    PublicTransportation,
    ReligionAndSpirituality,
    RestaurantBookingInfoAndReview,
    Schools,
    ScoreKeeping,
    SelfImprovement,
    Shopping,
    SmartHome,
    SocialNetworking,
    SportsGames,
    SportsNews,
    StreamingService,
    TaxiAndRidesharing,
    ToDoListsAndNotes,
    Translators,
    TvGuides,
    UnitConverters,
    Weather,
    WineAndBeverage,
    ZipCodeLookup,
}

// ---------------------------------------------------------------------------
// Apis
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Apis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<CustomApi>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomApi {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<Endpoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regions: Option<BTreeMap<String, RegionEndpoint>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<Interface>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    pub uri: String,
    #[serde(
        rename = "sslCertificateType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ssl_certificate_type: Option<String>,
}

/// Endpoint region codes.
pub mod region {
    pub const NORTH_AMERICA: &str = "NA";
    pub const EUROPE: &str = "EU";
    pub const FAR_EAST: &str = "FE";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionEndpoint {
    pub endpoint: Endpoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interface {
    #[serde(rename = "type")]
    pub interface_type: InterfaceType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterfaceType {
    #[serde(rename = "ALEXA_PRESENTATION_APL")]
    PresentationApl,
    #[serde(rename = "AUDIO_PLAYER")]
    AudioPlayer,
    #[serde(rename = "CAN_FULFILL_INTENT_REQUEST")]
    CanFulfillIntentRequest,
    #[serde(rename = "GADGET_CONTROLLER")]
    GadgetController,
    #[serde(rename = "GAME_ENGINE")]
    GameEngine,
    #[serde(rename = "RENDER_TEMPLATE")]
    RenderTemplate,
    #[serde(rename = "VIDEO_APP")]
    VideoApp,
}

// ---------------------------------------------------------------------------
// Privacy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivacyAndCompliance {
    #[serde(rename = "isExportCompliant")]
    pub export_compliant: bool,
    #[serde(rename = "containsAds")]
    pub contains_ads: bool,
    #[serde(rename = "allowsPurchases")]
    pub allows_purchases: bool,
    #[serde(rename = "usesPersonalInfo")]
    pub uses_personal_info: bool,
    #[serde(rename = "isChildDirected")]
    pub child_directed: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub locales: BTreeMap<String, PrivacyLocale>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivacyLocale {
    #[serde(
        rename = "privacyPolicyUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub privacy_policy_url: Option<String>,
    #[serde(
        rename = "termsOfUse",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub terms_of_use: Option<String>,
}
