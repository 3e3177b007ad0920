//! Demo data written into an empty store.

use crewboard_core::status::Status;

pub struct DemoSite {
  pub name:          &'static str,
  pub manager:       &'static str,
  pub phone:         &'static str,
  pub creation_date: &'static str,
  pub status:        Status,
}

pub struct DemoEmployee {
  pub name:          &'static str,
  pub surname:       &'static str,
  pub employee_id:   &'static str,
  pub creation_date: &'static str,
  pub status:        Status,
}

pub const SITES: &[DemoSite] = &[
  DemoSite {
    name:          "12 Buildings in Minnesota",
    manager:       "Juan Pérez",
    phone:         "555-0101",
    creation_date: "2024-01-15",
    status:        Status::Active,
  },
  DemoSite {
    name:          "Soccer Camp NYC",
    manager:       "María Gómez",
    phone:         "555-0102",
    creation_date: "2024-02-20",
    status:        Status::Active,
  },
  DemoSite {
    name:          "Central Building",
    manager:       "Carlos Ruiz",
    phone:         "555-0103",
    creation_date: "2024-03-10",
    status:        Status::Active,
  },
];

pub const EMPLOYEES: &[DemoEmployee] = &[
  DemoEmployee {
    name:          "Luis",
    surname:       "Fernández",
    employee_id:   "SS-12345",
    creation_date: "2024-01-10",
    status:        Status::Active,
  },
  DemoEmployee {
    name:          "Sofía",
    surname:       "Martínez",
    employee_id:   "SS-12346",
    creation_date: "2024-02-15",
    status:        Status::Active,
  },
  DemoEmployee {
    name:          "Roberto",
    surname:       "Díaz",
    employee_id:   "SS-12347",
    creation_date: "2024-01-20",
    status:        Status::Inactive,
  },
  DemoEmployee {
    name:          "Ana",
    surname:       "Gómez",
    employee_id:   "SS-12348",
    creation_date: "2024-03-01",
    status:        Status::Active,
  },
];
