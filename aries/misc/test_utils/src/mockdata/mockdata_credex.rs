pub const ARIES_CREDENTIAL_OFFER: &str = r#"{
    "@id": "57b3f85d-7673-4e6f-bb09-cc27cf2653c0",
    "@type": "https://didcomm.org/issue-credential/1.0/offer-credential",
    "comment": "Degree offer",
    "credential_preview": {
        "@type": "https://didcomm.org/issue-credential/1.0/credential-preview",
        "attributes": [
            {
                "name": "name",
                "value": "Alice"
            },
            {
                "name": "degree",
                "value": "maths"
            }
        ]
    },
    "offers~attach": [
        {
            "@id": "libindy-cred-offer-0",
            "mime-type": "application/json",
            "data": {
                "base64": "eyJzY2hlbWFfaWQiOiJWNFNHUlU4Nlo1OGQ2VFY3UEJVZTZmOjI6ZGVncmVlOjEuMCIsImNyZWRfZGVmX2lkIjoiVjRTR1JVODZaNThkNlRWN1BCVWU2ZjozOkNMOjUyOTp0YWciLCJrZXlfY29ycmVjdG5lc3NfcHJvb2YiOnsiYyI6IjI4NjU4MTM5NDcyODkxODM3NjQ5ODEyNTM3NDg5MTIiLCJ4el9jYXAiOiI1ODIwMzY5NDcyMDkzODQ3MjAxOTM4NDcyIiwieHJfY2FwIjpbWyJuYW1lIiwiNDM5MDU3MjA5Mzg0NyJdLFsiZGVncmVlIiwiOTkyODM3NDY1MyJdXX0sIm5vbmNlIjoiMTYxMTI2NzI0MDU0OTEwNDQ2OTkyMTYzIn0="
            }
        }
    ]
}"#;

pub const ARIES_CREDENTIAL_OFFER_LEGACY_TYPE: &str = r#"{
    "@id": "57b3f85d-7673-4e6f-bb09-cc27cf2653c0",
    "@type": "did:sov:BzCbsNYhMrjHiqZDTUASHg;spec/issue-credential/1.0/offer-credential",
    "comment": "Degree offer",
    "credential_preview": {
        "@type": "https://didcomm.org/issue-credential/1.0/credential-preview",
        "attributes": [
            {
                "name": "name",
                "value": "Alice"
            },
            {
                "name": "degree",
                "value": "maths"
            }
        ]
    },
    "offers~attach": [
        {
            "@id": "libindy-cred-offer-0",
            "mime-type": "application/json",
            "data": {
                "base64": "eyJzY2hlbWFfaWQiOiJWNFNHUlU4Nlo1OGQ2VFY3UEJVZTZmOjI6ZGVncmVlOjEuMCIsImNyZWRfZGVmX2lkIjoiVjRTR1JVODZaNThkNlRWN1BCVWU2ZjozOkNMOjUyOTp0YWciLCJrZXlfY29ycmVjdG5lc3NfcHJvb2YiOnsiYyI6IjI4NjU4MTM5NDcyODkxODM3NjQ5ODEyNTM3NDg5MTIiLCJ4el9jYXAiOiI1ODIwMzY5NDcyMDkzODQ3MjAxOTM4NDcyIiwieHJfY2FwIjpbWyJuYW1lIiwiNDM5MDU3MjA5Mzg0NyJdLFsiZGVncmVlIiwiOTkyODM3NDY1MyJdXX0sIm5vbmNlIjoiMTYxMTI2NzI0MDU0OTEwNDQ2OTkyMTYzIn0="
            }
        }
    ]
}"#;

/// Well formed offer a request cannot be derived from.
pub const ARIES_CREDENTIAL_OFFER_NO_NONCE: &str = r#"{
    "@id": "8a6f2c1e-3b7d-4f90-a2c5-e6d1b0f47a39",
    "@type": "https://didcomm.org/issue-credential/1.0/offer-credential",
    "comment": "Degree offer",
    "credential_preview": {
        "@type": "https://didcomm.org/issue-credential/1.0/credential-preview",
        "attributes": [
            {
                "name": "name",
                "value": "Alice"
            },
            {
                "name": "degree",
                "value": "maths"
            }
        ]
    },
    "offers~attach": [
        {
            "@id": "libindy-cred-offer-0",
            "mime-type": "application/json",
            "data": {
                "base64": "eyJzY2hlbWFfaWQiOiJWNFNHUlU4Nlo1OGQ2VFY3UEJVZTZmOjI6ZGVncmVlOjEuMCIsImNyZWRfZGVmX2lkIjoiVjRTR1JVODZaNThkNlRWN1BCVWU2ZjozOkNMOjUyOTp0YWciLCJrZXlfY29ycmVjdG5lc3NfcHJvb2YiOnsiYyI6IjI4NjU4MTM5NDcyODkxODM3NjQ5ODEyNTM3NDg5MTIiLCJ4el9jYXAiOiI1ODIwMzY5NDcyMDkzODQ3MjAxOTM4NDcyIiwieHJfY2FwIjpbWyJuYW1lIiwiNDM5MDU3MjA5Mzg0NyJdLFsiZGVncmVlIiwiOTkyODM3NDY1MyJdXX19"
            }
        }
    ]
}"#;

pub const ARIES_CREDENTIAL_OFFER_SECOND: &str = r#"{
    "@id": "d2c8e4a1-5f3b-4c7e-9a06-1b8f7e2d3c45",
    "@type": "https://didcomm.org/issue-credential/1.0/offer-credential",
    "comment": "Degree offer",
    "credential_preview": {
        "@type": "https://didcomm.org/issue-credential/1.0/credential-preview",
        "attributes": [
            {
                "name": "name",
                "value": "Alice"
            },
            {
                "name": "degree",
                "value": "maths"
            }
        ]
    },
    "offers~attach": [
        {
            "@id": "libindy-cred-offer-0",
            "mime-type": "application/json",
            "data": {
                "base64": "eyJzY2hlbWFfaWQiOiJWNFNHUlU4Nlo1OGQ2VFY3UEJVZTZmOjI6ZGVncmVlOjEuMCIsImNyZWRfZGVmX2lkIjoiVjRTR1JVODZaNThkNlRWN1BCVWU2ZjozOkNMOjUyOTp0YWciLCJrZXlfY29ycmVjdG5lc3NfcHJvb2YiOnsiYyI6IjI4NjU4MTM5NDcyODkxODM3NjQ5ODEyNTM3NDg5MTIiLCJ4el9jYXAiOiI1ODIwMzY5NDcyMDkzODQ3MjAxOTM4NDcyIiwieHJfY2FwIjpbWyJuYW1lIiwiNDM5MDU3MjA5Mzg0NyJdLFsiZGVncmVlIiwiOTkyODM3NDY1MyJdXX0sIm5vbmNlIjoiMTYxMTI2NzI0MDU0OTEwNDQ2OTkyMTYzIn0="
            }
        }
    ]
}"#;

pub const ARIES_CREDENTIAL_RESPONSE: &str = r#"{
    "@id": "c3d7a1b2-9e84-4f6a-8d2c-5b1e0f7a3c96",
    "@type": "https://didcomm.org/issue-credential/1.0/issue-credential",
    "comment": "Here is your degree",
    "credentials~attach": [
        {
            "@id": "libindy-cred-0",
            "mime-type": "application/json",
            "data": {
                "base64": "eyJzY2hlbWFfaWQiOiJWNFNHUlU4Nlo1OGQ2VFY3UEJVZTZmOjI6ZGVncmVlOjEuMCIsImNyZWRfZGVmX2lkIjoiVjRTR1JVODZaNThkNlRWN1BCVWU2ZjozOkNMOjUyOTp0YWciLCJ2YWx1ZXMiOnsibmFtZSI6eyJyYXciOiJBbGljZSIsImVuY29kZWQiOiIyNzAzNDY0MDAyNDExNzMzMTAzMzA2MzEyODA0NDAwNDMxODIxODQ4NjgxNjkzMTUyMDg4NjQwNTUzNTY1OTkzNDQxNzQzODc4MTUwNyJ9LCJkZWdyZWUiOnsicmF3IjoibWF0aHMiLCJlbmNvZGVkIjoiNzgxMzcyMDQ4NzM0NDg3NzY4NjI3MDUyNDAyNTg3MjMxNDE5NDA3NTcwMDY3MTA4Mzk3MzM1ODU2MzQxNDMyMTU4MDM4NDc0MTAwMTgifX0sInNpZ25hdHVyZSI6eyJwX2NyZWRlbnRpYWwiOnsibV8yIjoiNTc4MzI4MzU1NTY5Mjg3NDI3MjM5NDY3MjUwMDQ2MzgyMzgyMzYzODI0Mjc3OTM4NzY2MTc2MzkxNTg1MTc3MjY0NDUwNjk4MTUzOTciLCJhIjoiMjAzMzU1OTQzMTY3MzEzMzQ1OTc3NTg4MTY0NDM4ODU2MTk3MTYyODE5NDY4OTQwNzE1NDc2NzAxMTI4NzQyMjczNTMzNDk2MTM3MzMifX0sInNpZ25hdHVyZV9jb3JyZWN0bmVzc19wcm9vZiI6eyJzZSI6Ijg5OCIsImMiOiI5MzUifX0="
            }
        }
    ],
    "~thread": {
        "thid": "57b3f85d-7673-4e6f-bb09-cc27cf2653c0"
    },
    "~please_ack": {
        "on": [
            "RECEIPT"
        ]
    }
}"#;

pub const ARIES_PROBLEM_REPORT: &str = r#"{
    "@id": "e5a9c3b1-7d2f-4e8a-b6c0-9f1d3a5e7b24",
    "@type": "https://didcomm.org/issue-credential/1.0/problem-report",
    "description": {
        "code": "issuance-abandoned",
        "en": "Issuer revoked the offer"
    },
    "comment": "Issuer revoked the offer",
    "~thread": {
        "thid": "57b3f85d-7673-4e6f-bb09-cc27cf2653c0"
    }
}"#;

pub const LEGACY_CREDENTIAL_OFFER_ARRAY: &str = r#"[{"msg_type":"CRED_OFFER","version":"0.1","to_did":"8XFh8yBzrpJQmNyZzgoTqB","from_did":"8XFh8yBzrpJQmNyZzgoTqB","libindy_offer":"{}","cred_def_id":"V4SGRU86Z58d6TV7PBUe6f:3:CL:529:tag","claim_id":"defaultCredentialId","claim_name":"Credential"}]"#;

pub const CREDENTIAL_THREAD_ID: &str = "57b3f85d-7673-4e6f-bb09-cc27cf2653c0";

pub const PW_DID: &str = "2ZHFFhzA2XtTD6hJqzL7ux";
