use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Tr,
    #[default]
    De,
    En,
}

/// Static UI labels.
pub struct Labels {
    pub next_prayer_label: &'static str,
    pub next_prayer: &'static str,
    pub qibla_direction: &'static str,
    pub saved_locations: &'static str,
    pub no_saved_locations: &'static str,
    pub unknown: &'static str,
}

pub fn labels(lang: Language) -> &'static Labels {
    match lang {
        Language::Tr => &Labels {
            next_prayer_label: "Vaktin Çıkmasına Kalan Süre",
            next_prayer: "Sonraki Namaz",
            qibla_direction: "Kıble Yönü",
            saved_locations: "Kayıtlı Konumlar",
            no_saved_locations: "Kayıtlı konum yok",
            unknown: "Bilinmeyen Konum",
        },
        Language::De => &Labels {
            next_prayer_label: "Zeit bis zum nächsten Gebet",
            next_prayer: "Nächstes Gebet",
            qibla_direction: "Qibla-Richtung",
            saved_locations: "Gespeicherte Orte",
            no_saved_locations: "Keine Orte gespeichert",
            unknown: "Unbekannter Ort",
        },
        Language::En => &Labels {
            next_prayer_label: "Time until next prayer",
            next_prayer: "Next prayer",
            qibla_direction: "Qibla direction",
            saved_locations: "Saved locations",
            no_saved_locations: "No saved locations",
            unknown: "Unknown location",
        },
    }
}

pub fn advisory_title(lang: Language) -> &'static str {
    match lang {
        Language::Tr => "Namaz Hatırlatması",
        Language::De => "Gebetsbenachrichtigung",
        Language::En => "Prayer reminder",
    }
}

pub fn post_sunrise_message(lang: Language) -> &'static str {
    match lang {
        Language::Tr => "Güneş doğduktan sonraki 45 dakika boyunca namaz kılınmaz.",
        Language::De => {
            "In den ersten 45 Minuten nach Sonnenaufgang darf kein Gebet verrichtet werden."
        }
        Language::En => "No prayer is performed during the first 45 minutes after sunrise.",
    }
}

pub fn pre_dhuhr_message(lang: Language) -> &'static str {
    match lang {
        Language::Tr => "Öğle namazına 30 dakika kala namaz kılınmaz.",
        Language::De => "30 Minuten vor dem Mittagsgebet darf kein Gebet verrichtet werden.",
        Language::En => "No prayer is performed in the 30 minutes before Dhuhr.",
    }
}

pub fn pre_maghrib_message(lang: Language) -> &'static str {
    match lang {
        Language::Tr => "Akşam namazına 45 dakika kala sadece farz namaz kılınabilir.",
        Language::De => "45 Minuten vor dem Abendgebet dürfen nur Fard-Gebete verrichtet werden.",
        Language::En => "In the 45 minutes before Maghrib only obligatory (fard) prayers may be performed.",
    }
}
