use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every joinable faction, in canonical save order.
///
/// The set is closed: strings that do not map onto a variant are treated as
/// invalid input by the loaders, never as new factions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FactionName {
    Illuminati,
    Daedalus,
    #[serde(rename = "The Covenant")]
    TheCovenant,
    ECorp,
    MegaCorp,
    #[serde(rename = "Bachman & Associates")]
    BachmanAssociates,
    #[serde(rename = "Blade Industries")]
    BladeIndustries,
    #[serde(rename = "NWO")]
    Nwo,
    #[serde(rename = "Clarke Incorporated")]
    ClarkeIncorporated,
    #[serde(rename = "OmniTek Incorporated")]
    OmniTekIncorporated,
    #[serde(rename = "Four Sigma")]
    FourSigma,
    #[serde(rename = "KuaiGong International")]
    KuaiGongInternational,
    #[serde(rename = "Fulcrum Secret Technologies")]
    FulcrumSecretTechnologies,
    BitRunners,
    #[serde(rename = "The Black Hand")]
    TheBlackHand,
    NiteSec,
    Aevum,
    Chongqing,
    Ishima,
    #[serde(rename = "New Tokyo")]
    NewTokyo,
    #[serde(rename = "Sector-12")]
    Sector12,
    Volhaven,
    #[serde(rename = "Speakers for the Dead")]
    SpeakersForTheDead,
    #[serde(rename = "The Dark Army")]
    TheDarkArmy,
    #[serde(rename = "The Syndicate")]
    TheSyndicate,
    Silhouette,
    Tetrads,
    #[serde(rename = "Slum Snakes")]
    SlumSnakes,
    Netburners,
    #[serde(rename = "Tian Di Hui")]
    TianDiHui,
    CyberSec,
    Bladeburners,
    #[serde(rename = "Church of the Machine God")]
    ChurchOfTheMachineGod,
    #[serde(rename = "Shadows of Anarchy")]
    ShadowsOfAnarchy,
}

impl FactionName {
    pub const COUNT: usize = 34;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Illuminati,
        Self::Daedalus,
        Self::TheCovenant,
        Self::ECorp,
        Self::MegaCorp,
        Self::BachmanAssociates,
        Self::BladeIndustries,
        Self::Nwo,
        Self::ClarkeIncorporated,
        Self::OmniTekIncorporated,
        Self::FourSigma,
        Self::KuaiGongInternational,
        Self::FulcrumSecretTechnologies,
        Self::BitRunners,
        Self::TheBlackHand,
        Self::NiteSec,
        Self::Aevum,
        Self::Chongqing,
        Self::Ishima,
        Self::NewTokyo,
        Self::Sector12,
        Self::Volhaven,
        Self::SpeakersForTheDead,
        Self::TheDarkArmy,
        Self::TheSyndicate,
        Self::Silhouette,
        Self::Tetrads,
        Self::SlumSnakes,
        Self::Netburners,
        Self::TianDiHui,
        Self::CyberSec,
        Self::Bladeburners,
        Self::ChurchOfTheMachineGod,
        Self::ShadowsOfAnarchy,
    ];

    /// Ordinal of the variant within [`FactionName::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Name as written in save files and catalogs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Illuminati => "Illuminati",
            Self::Daedalus => "Daedalus",
            Self::TheCovenant => "The Covenant",
            Self::ECorp => "ECorp",
            Self::MegaCorp => "MegaCorp",
            Self::BachmanAssociates => "Bachman & Associates",
            Self::BladeIndustries => "Blade Industries",
            Self::Nwo => "NWO",
            Self::ClarkeIncorporated => "Clarke Incorporated",
            Self::OmniTekIncorporated => "OmniTek Incorporated",
            Self::FourSigma => "Four Sigma",
            Self::KuaiGongInternational => "KuaiGong International",
            Self::FulcrumSecretTechnologies => "Fulcrum Secret Technologies",
            Self::BitRunners => "BitRunners",
            Self::TheBlackHand => "The Black Hand",
            Self::NiteSec => "NiteSec",
            Self::Aevum => "Aevum",
            Self::Chongqing => "Chongqing",
            Self::Ishima => "Ishima",
            Self::NewTokyo => "New Tokyo",
            Self::Sector12 => "Sector-12",
            Self::Volhaven => "Volhaven",
            Self::SpeakersForTheDead => "Speakers for the Dead",
            Self::TheDarkArmy => "The Dark Army",
            Self::TheSyndicate => "The Syndicate",
            Self::Silhouette => "Silhouette",
            Self::Tetrads => "Tetrads",
            Self::SlumSnakes => "Slum Snakes",
            Self::Netburners => "Netburners",
            Self::TianDiHui => "Tian Di Hui",
            Self::CyberSec => "CyberSec",
            Self::Bladeburners => "Bladeburners",
            Self::ChurchOfTheMachineGod => "Church of the Machine God",
            Self::ShadowsOfAnarchy => "Shadows of Anarchy",
        }
    }

    /// Exact-match lookup; save data is case sensitive.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|faction| faction.as_str() == name)
    }
}

impl fmt::Display for FactionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FactionName {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or(())
    }
}

impl From<FactionName> for String {
    fn from(value: FactionName) -> Self {
        value.as_str().to_string()
    }
}
