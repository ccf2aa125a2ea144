//! Availability - Verifica che un orario sia prenotabile con un funzionario
//!
//! Il campo `availability` del funzionario elenca gli orari NON disponibili.
//! La data non viene considerata: lo stesso elenco vale per ogni giorno.

use crate::core::AppError;
use crate::entities::{Employee, Service};
use chrono::NaiveDate;
use tracing::{debug, warn};

/// Falso esattamente quando `hour` è uno degli orari bloccati del funzionario
pub fn is_slot_available(employee: &Employee, hour: &str) -> bool {
    !employee.availability.contains(hour)
}

/// Risolve il funzionario dal roster del servizio e controlla l'orario.
/// Nessuna chiamata di rete.
pub fn ensure_slot_available<'a>(
    service: &'a Service,
    employee_id: i32,
    date: NaiveDate,
    hour: &str,
) -> Result<&'a Employee, AppError> {
    if !service.is_bookable() {
        warn!(service_id = service.id, "Service has no employees");
        return Err(AppError::validation("Este serviço não tem profissionais disponíveis"));
    }

    let employee = service.employee(employee_id).ok_or_else(|| {
        warn!(service_id = service.id, employee_id, "Employee does not perform this service");
        AppError::validation("Profissional não realiza este serviço")
    })?;

    if !is_slot_available(employee, hour) {
        warn!(employee_id, %date, hour, "Slot is blocked");
        return Err(AppError::validation("Horário indisponível")
            .with_details(format!("{} {} com {}", date, hour, employee.username)));
    }

    debug!(employee_id, %date, hour, "Slot available");
    Ok(employee)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{BlockedHours, Role};

    fn employee(id: i32, blocked: &[&str]) -> Employee {
        Employee {
            id,
            username: format!("func{}", id),
            email: String::new(),
            cellphone: "923000000".into(),
            availability: BlockedHours::new(blocked.iter().copied()),
            role: Role::Employee,
            academic_level_id: None,
            academic_level: None,
            services: Vec::new(),
        }
    }

    fn service(employees: Vec<Employee>) -> Service {
        Service {
            id: 1,
            name: "Corte".into(),
            description: String::new(),
            price: 200,
            duration: 60,
            category_id: None,
            category: None,
            picture: None,
            employees,
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 5, 10).unwrap()
    }

    #[test]
    fn test_blocked_hour_is_unavailable() {
        let e = employee(1, &["14:00"]);
        assert!(!is_slot_available(&e, "14:00"));
        assert!(is_slot_available(&e, "15:00"));
        assert!(is_slot_available(&e, "09:00"));
    }

    #[test]
    fn test_empty_availability_means_always_free() {
        let e = employee(1, &[]);
        assert!(is_slot_available(&e, "08:00"));
        assert!(is_slot_available(&e, "20:00"));
    }

    #[test]
    fn test_date_is_not_consulted() {
        let s = service(vec![employee(1, &["10:00"])]);
        let other_day = day().succ_opt().unwrap();
        assert!(ensure_slot_available(&s, 1, day(), "10:00").is_err());
        assert!(ensure_slot_available(&s, 1, other_day, "10:00").is_err());
    }

    #[test]
    fn test_roster_rules() {
        let empty = service(Vec::new());
        assert!(ensure_slot_available(&empty, 1, day(), "10:00").is_err());

        let s = service(vec![employee(1, &[]), employee(2, &["11:00"])]);
        assert!(ensure_slot_available(&s, 3, day(), "10:00").is_err());
        assert_eq!(ensure_slot_available(&s, 2, day(), "10:00").unwrap().id, 2);
        assert!(ensure_slot_available(&s, 2, day(), "11:00").is_err());
    }
}
