//! Built-in keyword vocabulary for municipal-finance relevance
//!
//! These lists ship as defaults; operators can override either one in the
//! TOML config. Matching is case-insensitive throughout (both sides are
//! folded before comparison), so casing here is display-only.

/// High-value keywords that indicate strong relevance
pub const DEFAULT_PRIORITY_KEYWORDS: &[&str] = &[
    "Budget",
    "Finance",
    "ACFR",
    "Finance Director",
    "Comprehensive Annual Financial Report",
    "Financial Statements",
    "Annual Budget",
    "Expenditure Report",
    "Revenue Summary",
    "Audit Report",
    "Fiscal Year",
    "Budget Allocation",
    "General Fund",
    "Financial Planning",
    "Debt Service",
    "Operating Budget",
    "Capital Improvement Plan",
    "Statement of Net Position",
    "Balance Sheet",
    "Cash Flow Statement",
    "General Ledger",
    "Financial Analysis",
    "Expenditure Forecast",
    "Investment Portfolio",
    "Pension Liabilities",
    "Bond Ratings",
    "Restricted Funds",
    "Unrestricted Funds",
    "Fund Balance",
    "Reserve Fund",
    "Grants & Allocations",
    "State Appropriations",
    "Federal Funding",
    "Municipal Bonds",
    "Tax Revenue",
    "Public Expenditure",
    "Legislative Budget Office",
    "Budget Resolution",
    "Fiscal Responsibility",
    "Debt Management",
    "Government Accountability Office",
    "Generally Accepted Accounting Principles",
    "Governmental Accounting Standards Board",
    "Office of Management and Budget",
    "Single Audit",
    "Transparency Report",
    "Procurement Policy",
    "Public Financial Management",
    "Chief Financial Officer",
    "CFO",
    "Finance Department",
    "Finance Office",
    "Accounting Department",
    "Treasurer",
    "City Treasurer",
    "County Treasurer",
    "Budget Coordinator",
    "Budget Manager",
    "Finance Manager",
    "Financial Controller",
    "Accounts Payable",
    "Accounts Receivable",
    "Audit Committee",
    "Fiscal Officer",
    "Fiscal Services",
    "Treasury Division",
    "Finance Administrator",
    "Director of Budget",
    "Revenue Officer",
    "Financial Services Department",
    "Business Office",
    "Procurement Officer",
    "Grants Manager",
    "Public Finance Director",
    "Financial Compliance",
    "Financial Analyst",
    "Municipal Finance Director",
    "Assistant Finance Director",
    "Finance and Administration",
    "Controller",
    "Senior Accountant",
    "Budget Analyst",
    "Finance Contact",
    "Financial Operations",
    "Public Finance Contact",
    "Treasury Contact",
    "Finance Email",
    "Finance Phone Number",
    "Finance Help Desk",
    "Financial Assistance Contact",
    "Accounts Department Contact",
];

/// Low-value keywords that indicate generic site-navigation content
pub const DEFAULT_NON_PRIORITY_KEYWORDS: &[&str] = &[
    "service request",
    "apply",
    "cancel",
    "customer support",
    "billing",
    "utility",
    "utilities",
    "register",
    "skip",
    "skip to",
    "tickets",
    "request",
];
