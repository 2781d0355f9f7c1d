//! Department business logic - store operations for the department collection.

use crate::{
    core::{
        pagination::{Page, Pagination},
        records::{DepartmentRecord, parse_record_id},
        require_non_empty, set_if_changed,
    },
    entities::{Department, department},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, QuerySelect, Set, prelude::*};
use serde::Deserialize;
use tracing::{debug, info};

const ENTITY: &str = "Department";

/// Fields accepted when creating a department.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewDepartment {
    pub department_id: i64,
    pub department: String,
}

/// Partial department update. The natural key cannot be changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DepartmentPatch {
    pub department: Option<String>,
}

impl DepartmentPatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.department.is_none()
    }
}

/// Lists one page of departments with the collection's total size.
pub async fn list_departments(
    db: &DatabaseConnection,
    pagination: Pagination,
) -> Result<Page<DepartmentRecord>> {
    debug!(
        skip = pagination.skip(),
        limit = pagination.limit(),
        "Listing departments"
    );
    let models = Department::find()
        .order_by_asc(department::Column::Id)
        .offset(pagination.skip())
        .limit(pagination.limit())
        .all(db)
        .await?;
    let total = Department::find().count(db).await?;
    Ok(Page::from_models(pagination, total, models))
}

/// Finds a department by its id.
pub async fn get_department(db: &DatabaseConnection, id: &str) -> Result<Option<DepartmentRecord>> {
    let key = parse_record_id(id)?;
    Ok(Department::find_by_id(key).one(db).await?.map(DepartmentRecord::from))
}

/// Inserts a new department and returns it as stored.
///
/// # Errors
/// Returns an error if the department name is blank or the database insert fails.
pub async fn create_department(db: &DatabaseConnection, new_department: NewDepartment) -> Result<DepartmentRecord> {
    require_non_empty("department", &new_department.department)?;

    let department = department::ActiveModel {
        department_id: Set(new_department.department_id),
        department: Set(new_department.department),
        ..Default::default()
    };
    let model = department.insert(db).await?;
    info!(id = model.id, department_id = model.department_id, "Department created");
    Ok(model.into())
}

/// Renames a department. Returns whether the stored name changed.
pub async fn update_department(db: &DatabaseConnection, id: &str, patch: DepartmentPatch) -> Result<bool> {
    let key = parse_record_id(id)?;
    if patch.is_empty() {
        return Err(Error::EmptyUpdate { entity: ENTITY });
    }
    let name = match patch.department {
        Some(name) => {
            require_non_empty("department", &name)?;
            Some(name)
        }
        None => None,
    };

    let Some(current) = Department::find_by_id(key).one(db).await? else {
        return Ok(false);
    };
    let mut department: department::ActiveModel = current.clone().into();
    let changed = set_if_changed(&mut department.department, &current.department, name);
    if changed {
        department.update(db).await?;
        info!(id = key, "Department updated");
    }
    Ok(changed)
}

/// Deletes a department, returning whether a row was removed.
pub async fn delete_department(db: &DatabaseConnection, id: &str) -> Result<bool> {
    let key = parse_record_id(id)?;
    let result = Department::delete_by_id(key).exec(db).await?;
    Ok(result.rows_affected > 0)
}
