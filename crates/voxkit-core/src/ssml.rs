//! SSML markup helpers.
//!
//! Thin string combinators producing the speech markup subset the platform
//! accepts. They compose inside-out; wrap the final text with [`speak`].

use std::fmt::Write;

/// Wrap text in `<speak>` tags. The response path detects this wrapper and
/// sends the speech as SSML.
pub fn speak(text: &str) -> String {
    format!("<speak>{text}</speak>")
}

/// Wrap text in a paragraph.
pub fn paragraph(text: &str) -> String {
    format!("<p>{text}</p>")
}

/// Wrap text in a sentence.
pub fn sentence(text: &str) -> String {
    format!("<s>{text}</s>")
}

/// Length of a [`pause`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakStrength {
    None,
    XWeak,
    Weak,
    Medium,
    Strong,
    XStrong,
}

impl BreakStrength {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::XWeak => "x-weak",
            Self::Weak => "weak",
            Self::Medium => "medium",
            Self::Strong => "strong",
            Self::XStrong => "x-strong",
        }
    }
}

/// Insert a pause, by strength or by duration (`ms` or `s`, at most 10s).
/// Give one of the two, not both.
pub fn pause(strength: Option<BreakStrength>, time: Option<&str>) -> String {
    let mut tag = String::from("<break");
    if let Some(strength) = strength {
        let _ = write!(tag, r#" strength="{}""#, strength.as_str());
    }
    if let Some(time) = time {
        let _ = write!(tag, r#" time="{time}""#);
    }
    tag.push_str("/>");
    tag
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmphasisLevel {
    /// Louder and slower.
    Strong,
    Moderate,
    /// Softer and faster.
    Reduced,
}

impl EmphasisLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Moderate => "moderate",
            Self::Reduced => "reduced",
        }
    }
}

/// Emphasize text; without a level the platform default applies.
pub fn emphasis(level: Option<EmphasisLevel>, text: &str) -> String {
    match level {
        Some(level) => format!(r#"<emphasis level="{}">{text}</emphasis>"#, level.as_str()),
        None => format!("<emphasis>{text}</emphasis>"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProsodyRate {
    XSlow,
    Slow,
    Medium,
    Fast,
    XFast,
}

impl ProsodyRate {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::XSlow => "x-slow",
            Self::Slow => "slow",
            Self::Medium => "medium",
            Self::Fast => "fast",
            Self::XFast => "x-fast",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProsodyPitch {
    XLow,
    Low,
    Medium,
    High,
    XHigh,
}

impl ProsodyPitch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::XLow => "x-low",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::XHigh => "x-high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProsodyVolume {
    Silent,
    XSoft,
    Soft,
    Medium,
    Loud,
    XLoud,
}

impl ProsodyVolume {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Silent => "silent",
            Self::XSoft => "x-soft",
            Self::Soft => "soft",
            Self::Medium => "medium",
            Self::Loud => "loud",
            Self::XLoud => "x-loud",
        }
    }
}

/// Modify rate, pitch, and volume of the tagged speech. Omitted attributes
/// keep the platform default.
pub fn prosody(
    rate: Option<ProsodyRate>,
    pitch: Option<ProsodyPitch>,
    volume: Option<ProsodyVolume>,
    text: &str,
) -> String {
    let mut tag = String::from("<prosody");
    if let Some(rate) = rate {
        let _ = write!(tag, r#" rate="{}""#, rate.as_str());
    }
    if let Some(pitch) = pitch {
        let _ = write!(tag, r#" pitch="{}""#, pitch.as_str());
    }
    if let Some(volume) = volume {
        let _ = write!(tag, r#" volume="{}""#, volume.as_str());
    }
    let _ = write!(tag, ">{text}</prosody>");
    tag
}

/// How [`say_as`] should read the tagged text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SayAsInterpretAs {
    /// Spell out each letter.
    Characters,
    Cardinal,
    Ordinal,
    /// Spell each digit separately.
    Digits,
    Fraction,
    Unit,
    /// Dates take an optional format attribute.
    Date,
    Time,
    Telephone,
    Address,
    /// Spoken in a more expressive voice; only supported speechcons work.
    Interjection,
    /// Bleeps out the tagged content.
    Expletive,
}

impl SayAsInterpretAs {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Characters => "characters",
            Self::Cardinal => "cardinal",
            Self::Ordinal => "ordinal",
            Self::Digits => "digits",
            Self::Fraction => "fraction",
            Self::Unit => "unit",
            Self::Date => "date",
            Self::Time => "time",
            Self::Telephone => "telephone",
            Self::Address => "address",
            Self::Interjection => "interjection",
            Self::Expletive => "expletive",
        }
    }
}

/// Read the text in a specific way. `format` only applies to dates.
pub fn say_as(interpret_as: SayAsInterpretAs, format: Option<&str>, text: &str) -> String {
    match (interpret_as, format) {
        (SayAsInterpretAs::Date, Some(format)) => format!(
            r#"<say-as interpret-as="date" format="{format}">{text}</say-as>"#
        ),
        _ => format!(
            r#"<say-as interpret-as="{}">{text}</say-as>"#,
            interpret_as.as_str()
        ),
    }
}

/// Play an MP3 file instead of speaking.
pub fn audio(src: &str) -> String {
    format!(r#"<audio src="{src}"/>"#)
}

/// Speak text in another language.
pub fn lang(language: &str, text: &str) -> String {
    format!(r#"<lang xml:lang="{language}">{text}</lang>"#)
}

/// Polly voice names, grouped by locale.
pub mod voice {
    pub const IVY: &str = "Ivy";
    pub const JOANNA: &str = "Joanna";
    pub const JUSTIN: &str = "Justin";
    pub const KENDRA: &str = "Kendra";
    pub const KIMBERLY: &str = "Kimberly";
    pub const MATTHEW: &str = "Matthew";
    pub const SALLI: &str = "Salli";
    pub const NICOLE: &str = "Nicole";
    pub const RUSSELL: &str = "Russell";
    pub const AMY: &str = "Amy";
    pub const BRIAN: &str = "Brian";
    pub const EMMA: &str = "Emma";
    pub const ADITI: &str = "Aditi";
    pub const RAVEENA: &str = "Raveena";
    pub const CHANTAL: &str = "Chantal";
    pub const CELINE: &str = "Celine";
    pub const LEA: &str = "Lea";
    pub const MATHIEU: &str = "Mathieu";
    pub const HANS: &str = "Hans";
    pub const MARLENE: &str = "Marlene";
    pub const VICKI: &str = "Vicki";
    pub const CARLA: &str = "Carla";
    pub const GIORGIO: &str = "Giorgio";
    pub const BIANCA: &str = "Bianca";
    pub const MIZUKI: &str = "Mizuki";
    pub const TAKUMI: &str = "Takumi";
    pub const VITORIA: &str = "Vitoria";
    pub const CAMILA: &str = "Camila";
    pub const RICARDO: &str = "Ricardo";
    pub const PENELOPE: &str = "Penelope";
    pub const LUPE: &str = "Lupe";
    pub const MIGUEL: &str = "Miguel";
    pub const CONCHITA: &str = "Conchita";
    pub const ENRIQUE: &str = "Enrique";
    pub const LUCIA: &str = "Lucia";
    pub const MIA: &str = "Mia";
}

/// Speak text with a specific Polly voice.
pub fn voice(name: &str, text: &str) -> String {
    format!(r#"<voice name="{name}">{text}</voice>"#)
}

/// Speak text with a specific Polly voice in another language.
pub fn voice_lang(name: &str, language: &str, text: &str) -> String {
    format!(r#"<voice name="{name}"><lang xml:lang="{language}">{text}</lang></voice>"#)
}

/// Pronounce an alias instead of the tagged text, e.g. abbreviations.
pub fn sub(alias: &str, text: &str) -> String {
    format!(r#"<sub alias="{alias}">{text}</sub>"#)
}

/// Alphabet for [`phoneme`] pronunciations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhonemeAlphabet {
    Ipa,
    XSampa,
}

impl PhonemeAlphabet {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ipa => "ipa",
            Self::XSampa => "x-sampa",
        }
    }
}

/// Pronounce the text from phonetic characters.
pub fn phoneme(alphabet: PhonemeAlphabet, ph: &str, text: &str) -> String {
    format!(
        r#"<phoneme alphabet="{}" ph="{ph}">{text}</phoneme>"#,
        alphabet.as_str()
    )
}

/// Speech domains for [`domain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    Conversational,
    LongForm,
    Music,
    News,
    Fun,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conversational => "conversational",
            Self::LongForm => "long-form",
            Self::Music => "music",
            Self::News => "news",
            Self::Fun => "fun",
        }
    }
}

/// Use a specific domain of speech.
pub fn domain(domain: Domain, text: &str) -> String {
    format!(
        r#"<amazon:domain name="{}">{text}</amazon:domain>"#,
        domain.as_str()
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Whispered,
}

impl Effect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Whispered => "whispered",
        }
    }
}

/// Wrap text in a speech effect.
pub fn effect(effect: Effect, text: &str) -> String {
    format!(
        r#"<amazon:effect name="{}">{text}</amazon:effect>"#,
        effect.as_str()
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emotion {
    Excited,
    Disappointed,
}

impl Emotion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excited => "excited",
            Self::Disappointed => "disappointed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmotionIntensity {
    Low,
    Medium,
    High,
}

impl EmotionIntensity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Speak text with an emotion at a given intensity.
pub fn emotion(name: Emotion, intensity: EmotionIntensity, text: &str) -> String {
    format!(
        r#"<amazon:emotion name="{}" intensity="{}">{text}</amazon:emotion>"#,
        name.as_str(),
        intensity.as_str()
    )
}

/// Word roles for [`word`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordRole {
    /// Present simple verb.
    Verb,
    /// Past participle.
    PastParticiple,
    Noun,
    /// Non-default sense of the word, e.g. "bass" the fish.
    AlternateSense,
}

impl WordRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verb => "amazon:VB",
            Self::PastParticiple => "amazon:VBD",
            Self::Noun => "amazon:NN",
            Self::AlternateSense => "amazon:SENSE-1",
        }
    }
}

/// Customize the pronunciation of a word by its part of speech.
pub fn word(role: WordRole, text: &str) -> String {
    format!(r#"<w role="{}">{text}</w>"#, role.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speak_wraps_text() {
        assert_eq!(speak("hello"), "<speak>hello</speak>");
    }

    #[test]
    fn test_paragraph_and_sentence() {
        assert_eq!(paragraph("one"), "<p>one</p>");
        assert_eq!(sentence("two"), "<s>two</s>");
    }

    #[test]
    fn test_pause_variants() {
        assert_eq!(pause(None, None), "<break/>");
        assert_eq!(
            pause(Some(BreakStrength::XStrong), None),
            r#"<break strength="x-strong"/>"#
        );
        assert_eq!(pause(None, Some("500ms")), r#"<break time="500ms"/>"#);
    }

    #[test]
    fn test_emphasis() {
        assert_eq!(emphasis(None, "hi"), "<emphasis>hi</emphasis>");
        assert_eq!(
            emphasis(Some(EmphasisLevel::Reduced), "hi"),
            r#"<emphasis level="reduced">hi</emphasis>"#
        );
    }

    #[test]
    fn test_prosody_skips_missing_attributes() {
        assert_eq!(prosody(None, None, None, "hi"), "<prosody>hi</prosody>");
        assert_eq!(
            prosody(
                Some(ProsodyRate::Slow),
                None,
                Some(ProsodyVolume::XLoud),
                "hi"
            ),
            r#"<prosody rate="slow" volume="x-loud">hi</prosody>"#
        );
    }

    #[test]
    fn test_say_as_date_format() {
        assert_eq!(
            say_as(SayAsInterpretAs::Date, Some("ymd"), "2023-05-01"),
            r#"<say-as interpret-as="date" format="ymd">2023-05-01</say-as>"#
        );
        // format is only honored for dates
        assert_eq!(
            say_as(SayAsInterpretAs::Cardinal, Some("ymd"), "12345"),
            r#"<say-as interpret-as="cardinal">12345</say-as>"#
        );
    }

    #[test]
    fn test_audio_tag_is_self_closing() {
        assert_eq!(
            audio("https://audio.example.com/ding.mp3"),
            r#"<audio src="https://audio.example.com/ding.mp3"/>"#
        );
    }

    #[test]
    fn test_voice_and_lang() {
        assert_eq!(
            voice(voice::KENDRA, "hello"),
            r#"<voice name="Kendra">hello</voice>"#
        );
        assert_eq!(
            voice_lang(voice::HANS, "de-DE", "hallo"),
            r#"<voice name="Hans"><lang xml:lang="de-DE">hallo</lang></voice>"#
        );
        assert_eq!(
            lang("fr-FR", "bonjour"),
            r#"<lang xml:lang="fr-FR">bonjour</lang>"#
        );
    }

    #[test]
    fn test_phoneme_and_sub() {
        assert_eq!(
            phoneme(PhonemeAlphabet::Ipa, "pɪˈkɑːn", "pecan"),
            r#"<phoneme alphabet="ipa" ph="pɪˈkɑːn">pecan</phoneme>"#
        );
        assert_eq!(
            sub("aluminum", "Al"),
            r#"<sub alias="aluminum">Al</sub>"#
        );
    }

    #[test]
    fn test_domain_effect_emotion() {
        assert_eq!(
            domain(Domain::LongForm, "story"),
            r#"<amazon:domain name="long-form">story</amazon:domain>"#
        );
        assert_eq!(
            effect(Effect::Whispered, "psst"),
            r#"<amazon:effect name="whispered">psst</amazon:effect>"#
        );
        assert_eq!(
            emotion(Emotion::Excited, EmotionIntensity::Medium, "we won"),
            r#"<amazon:emotion name="excited" intensity="medium">we won</amazon:emotion>"#
        );
    }

    #[test]
    fn test_word_roles() {
        assert_eq!(
            word(WordRole::AlternateSense, "bass"),
            r#"<w role="amazon:SENSE-1">bass</w>"#
        );
        assert_eq!(word(WordRole::Verb, "read"), r#"<w role="amazon:VB">read</w>"#);
    }

    #[test]
    fn test_composition() {
        let text = speak(&format!(
            "{}{}",
            sentence("Welcome."),
            pause(None, Some("1s"))
        ));
        assert_eq!(text, "<speak><s>Welcome.</s><break time=\"1s\"/></speak>");
    }
}
