pub const QUERY_GET_STAFF_BY_ACCESS_CODE: &str = r#"
SELECT
    id,access_code,display_name,department,
    bound_identity,pending_identity,pending_at,created_at,updated_at
FROM staff
WHERE lower(access_code)=lower($1)
LIMIT 1;
"#;

pub const QUERY_GET_STAFF_BY_BOUND_IDENTITY: &str = r#"
SELECT
    id,access_code,display_name,department,
    bound_identity,pending_identity,pending_at,created_at,updated_at
FROM staff
WHERE bound_identity=$1
LIMIT 1;
"#;

pub const QUERY_GET_STAFF_BY_PENDING_IDENTITY: &str = r#"
SELECT
    id,access_code,display_name,department,
    bound_identity,pending_identity,pending_at,created_at,updated_at
FROM staff
WHERE pending_identity=$1
ORDER BY pending_at DESC
LIMIT 1;
"#;

pub const QUERY_SET_PENDING_IDENTITY: &str = r#"
UPDATE staff
SET pending_identity=$2, pending_at=$3, updated_at=$4
WHERE id=$1 AND bound_identity IS NULL;
"#;

pub const QUERY_CONFIRM_PENDING_IDENTITY: &str = r#"
UPDATE staff
SET bound_identity=$2, pending_identity=NULL, pending_at=NULL, updated_at=$3
WHERE
    id=$1 AND
    pending_identity=$2 AND
    bound_identity IS NULL AND
    NOT EXISTS (SELECT 1 FROM staff other WHERE other.bound_identity=$2);
"#;

pub const QUERY_CLEAR_PENDING_IDENTITY: &str = r#"
UPDATE staff
SET pending_identity=NULL, pending_at=NULL, updated_at=$2
WHERE pending_identity=$1;
"#;

pub const QUERY_CLEAR_OTHER_PENDING_IDENTITY: &str = r#"
UPDATE staff
SET pending_identity=NULL, pending_at=NULL, updated_at=$3
WHERE pending_identity=$1 AND id<>$2;
"#;

pub const QUERY_CLEAR_EXPIRED_PENDING_IDENTITY: &str = r#"
UPDATE staff
SET pending_identity=NULL, pending_at=NULL, updated_at=$3
WHERE
    pending_identity=$1 AND
    (pending_at IS NULL OR pending_at < $2);
"#;
