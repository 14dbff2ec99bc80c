//! In-memory employee and time log collections.
//!
//! Both collections keep insertion order. Ids come from two independent
//! counters starting at 1 and are never reused, even after a delete.

use chrono::Utc;

use crate::model::{
    employee::Employee,
    log_entry::{LogEntry, LogType},
};

#[derive(Debug)]
pub struct Store {
    employees: Vec<Employee>,
    logs: Vec<LogEntry>,
    next_employee_id: u64,
    next_log_id: u64,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            employees: Vec::new(),
            logs: Vec::new(),
            next_employee_id: 1,
            next_log_id: 1,
        }
    }
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_employee(&mut self, name: String, role: String) -> Employee {
        let employee = Employee {
            id: self.next_employee_id,
            name,
            role,
        };
        self.next_employee_id += 1;
        self.employees.push(employee.clone());
        employee
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn employee(&self, id: u64) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    pub fn contains_employee(&self, id: u64) -> bool {
        self.employee(id).is_some()
    }

    /// Overwrites the whole record, keeping its id and position.
    pub fn replace_employee(&mut self, id: u64, name: String, role: String) -> Option<Employee> {
        let slot = self.employees.iter_mut().find(|e| e.id == id)?;
        *slot = Employee { id, name, role };
        Some(slot.clone())
    }

    /// Overwrites only the fields that are `Some`.
    pub fn patch_employee(
        &mut self,
        id: u64,
        name: Option<String>,
        role: Option<String>,
    ) -> Option<Employee> {
        let employee = self.employees.iter_mut().find(|e| e.id == id)?;
        if let Some(name) = name {
            employee.name = name;
        }
        if let Some(role) = role {
            employee.role = role;
        }
        Some(employee.clone())
    }

    /// Removes the employee and every log entry that references it.
    /// Returns the removed record and the number of logs dropped with it.
    pub fn delete_employee(&mut self, id: u64) -> Option<(Employee, usize)> {
        let index = self.employees.iter().position(|e| e.id == id)?;
        let employee = self.employees.remove(index);

        let before = self.logs.len();
        self.logs.retain(|log| log.employee_id != id);

        Some((employee, before - self.logs.len()))
    }

    /// Appends a clock event stamped with the current time. No IN/OUT
    /// alternation is enforced.
    pub fn record_clock(&mut self, employee_id: u64, kind: LogType) -> Option<LogEntry> {
        if !self.contains_employee(employee_id) {
            return None;
        }

        let entry = LogEntry {
            id: self.next_log_id,
            employee_id,
            kind,
            time: Utc::now(),
        };
        self.next_log_id += 1;
        self.logs.push(entry.clone());
        Some(entry)
    }

    pub fn logs(&self, employee_id: Option<u64>) -> Vec<LogEntry> {
        match employee_id {
            Some(id) => self
                .logs
                .iter()
                .filter(|log| log.employee_id == id)
                .cloned()
                .collect(),
            None => self.logs.clone(),
        }
    }
}
