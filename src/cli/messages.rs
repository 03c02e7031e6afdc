//! Localized interface text for the terminal front end

use crate::domain::locale::Locale;

/// Terminal strings in one locale
#[derive(Debug, Clone, Copy)]
pub struct Messages {
    locale: Locale,
}

impl Messages {
    pub const fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub const fn locale(&self) -> Locale {
        self.locale
    }

    const fn pick(&self, en: &'static str, fr: &'static str) -> &'static str {
        match self.locale {
            Locale::English => en,
            Locale::French => fr,
        }
    }

    pub const fn welcome(&self) -> &'static str {
        self.pick(
            "Dream Synthesizer. Describe a dream, then transcribe, illustrate and analyze it. Type 'help' for commands.",
            "Synthétiseur de rêves. Décrivez un rêve, puis transcrivez-le, illustrez-le et analysez-le. Tapez 'help' pour l'aide.",
        )
    }

    pub const fn help(&self) -> &'static str {
        self.pick(
            "Commands:
  upload <file>       Load a wav, mp3 or m4a recording
  record [duration]   Record from the microphone (e.g. 30s, 1m)
  transcribe          Transcribe the loaded audio
  image [path]        Illustrate the transcribed dream
  emotion             Analyze the dream's emotion and save it to history
  status              Show the current dream
  history             List saved dreams
  help                Show this help
  quit                Leave the session",
            "Commandes :
  upload <fichier>    Charger un enregistrement wav, mp3 ou m4a
  record [durée]      Enregistrer depuis le micro (ex. 30s, 1m)
  transcribe          Transcrire l'audio chargé
  image [chemin]      Illustrer le rêve transcrit
  emotion             Analyser l'émotion du rêve et l'ajouter à l'historique
  status              Afficher le rêve en cours
  history             Lister les rêves enregistrés
  help                Afficher cette aide
  quit                Quitter la session",
        )
    }

    pub const fn prompt(&self) -> &'static str {
        "dream> "
    }

    pub const fn unknown_command(&self) -> &'static str {
        self.pick(
            "Unknown command. Type 'help' for the list of commands.",
            "Commande inconnue. Tapez 'help' pour la liste des commandes.",
        )
    }

    pub const fn audio_loaded(&self) -> &'static str {
        self.pick("Audio loaded", "Audio chargé")
    }

    pub const fn recording(&self) -> &'static str {
        self.pick("Recording...", "Enregistrement...")
    }

    pub const fn recording_complete(&self) -> &'static str {
        self.pick("Recording complete", "Enregistrement terminé")
    }

    pub const fn transcribing(&self) -> &'static str {
        self.pick("Transcribing audio...", "Transcription en cours...")
    }

    pub const fn transcription_complete(&self) -> &'static str {
        self.pick("Transcription complete", "Transcription terminée")
    }

    pub const fn generating_image(&self) -> &'static str {
        self.pick("Generating image...", "Génération de l'image...")
    }

    pub const fn image_saved(&self) -> &'static str {
        self.pick("Image saved to", "Image enregistrée dans")
    }

    pub const fn image_not_saved(&self) -> &'static str {
        self.pick("Failed to save image", "Impossible d'enregistrer l'image")
    }

    pub const fn analyzing_emotion(&self) -> &'static str {
        self.pick("Analyzing emotion...", "Analyse de l'émotion...")
    }

    pub const fn dream_saved(&self) -> &'static str {
        self.pick("Dream saved to history", "Rêve ajouté à l'historique")
    }

    pub const fn need_audio(&self) -> &'static str {
        self.pick(
            "Load or record audio first ('upload <file>' or 'record').",
            "Chargez ou enregistrez un audio d'abord ('upload <fichier>' ou 'record').",
        )
    }

    pub const fn need_transcription(&self) -> &'static str {
        self.pick(
            "Transcribe the dream first ('transcribe').",
            "Transcrivez d'abord le rêve ('transcribe').",
        )
    }

    pub const fn dream_of(&self) -> &'static str {
        self.pick("Dream of", "Rêve du")
    }

    pub const fn transcription_label(&self) -> &'static str {
        self.pick("Transcription", "Transcription")
    }

    pub const fn emotion_label(&self) -> &'static str {
        self.pick("Emotion", "Émotion")
    }

    pub const fn image_label(&self) -> &'static str {
        self.pick("Image generated", "Image générée")
    }

    pub const fn state_label(&self) -> &'static str {
        self.pick("State", "État")
    }

    pub const fn audio_label(&self) -> &'static str {
        self.pick("Audio", "Audio")
    }

    pub const fn yes_no(&self, value: bool) -> &'static str {
        match value {
            true => self.pick("Yes", "Oui"),
            false => self.pick("No", "Non"),
        }
    }

    pub const fn none(&self) -> &'static str {
        self.pick("(none)", "(aucun)")
    }

    pub const fn empty_history(&self) -> &'static str {
        self.pick(
            "No dreams recorded yet. Record a dream and analyze its emotion to see it here.",
            "Aucun rêve enregistré pour le moment. Enregistrez un rêve et analysez son émotion pour le voir ici.",
        )
    }

    pub fn enter_api_key(&self, name: &str) -> String {
        match self.locale {
            Locale::English => format!("Enter your {} API key for development: ", name),
            Locale::French => {
                format!("Entrez votre clé API {} pour le développement : ", name)
            }
        }
    }

    pub fn configure_api_key(&self, name: &str, env_var: &str, secret_key: &str) -> String {
        match self.locale {
            Locale::English => format!(
                "Please configure your {} API key in the secrets file ('{}') or as the {} environment variable",
                name, secret_key, env_var
            ),
            Locale::French => format!(
                "Veuillez configurer votre clé API {} dans le fichier de secrets ('{}') ou comme variable d'environnement {}",
                name, secret_key, env_var
            ),
        }
    }
}
