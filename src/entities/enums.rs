//! Enumerazioni - Tipi enumerati utilizzati nelle entità
//!
//! Oltre ai valori trasmessi dal backend, qui vivono le etichette in portoghese
//! mostrate all'utente e la tabella delle transizioni di stato degli appuntamenti.

use serde::{Deserialize, Serialize};
use std::fmt;

// ********************* ENUMERAZIONI UTILI **********************//

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Client,
    Employee,
    Manager,
    /// Qualsiasi valore non riconosciuto dal backend, non ha alcun permesso
    #[serde(other)]
    Unknown,
}

impl Role {
    /// Etichetta mostrata nell'interfaccia
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Manager => "Gerente",
            Role::Employee => "Funcionário",
            Role::Client => "Cliente",
            Role::Unknown => "Usuário",
        }
    }

    /// Valore così come viaggia sul filo, usato anche nelle chiavi della cache
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "CLIENT",
            Role::Employee => "EMPLOYEE",
            Role::Manager => "MANAGER",
            Role::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Canceled,
    Completed,
    #[serde(other)]
    Unknown,
}

impl AppointmentStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "Pendente",
            AppointmentStatus::Confirmed => "Confirmado",
            AppointmentStatus::Canceled => "Cancelado",
            AppointmentStatus::Completed => "Concluído",
            AppointmentStatus::Unknown => "Status desconhecido",
        }
    }

    /// Colore del badge. Solo presentazione, nessuna guardia lo legge.
    pub fn color(&self) -> ColorToken {
        match self {
            AppointmentStatus::Pending => ColorToken::Yellow,
            AppointmentStatus::Confirmed => ColorToken::Green,
            AppointmentStatus::Canceled => ColorToken::Red,
            AppointmentStatus::Completed => ColorToken::Blue,
            AppointmentStatus::Unknown => ColorToken::Gray,
        }
    }

    /// Tabella delle transizioni:
    /// PENDING -> CONFIRMED | CANCELED, CONFIRMED -> COMPLETED | CANCELED.
    /// CANCELED e COMPLETED sono terminali.
    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        matches!(
            (self, next),
            (AppointmentStatus::Pending, AppointmentStatus::Confirmed)
                | (AppointmentStatus::Pending, AppointmentStatus::Canceled)
                | (AppointmentStatus::Confirmed, AppointmentStatus::Completed)
                | (AppointmentStatus::Confirmed, AppointmentStatus::Canceled)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, AppointmentStatus::Canceled | AppointmentStatus::Completed)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let raw = match self {
            AppointmentStatus::Pending => "PENDING",
            AppointmentStatus::Confirmed => "CONFIRMED",
            AppointmentStatus::Canceled => "CANCELED",
            AppointmentStatus::Completed => "COMPLETED",
            AppointmentStatus::Unknown => "UNKNOWN",
        };
        f.write_str(raw)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorToken {
    Yellow,
    Green,
    Red,
    Blue,
    Gray,
}
